//! Maze jobs as data, so they can live in a RON file.
//!
//! ```rust
//! use meander::maze::MazeConfig;
//!
//! let job = MazeConfig::from_ron(
//!     "(rows: 8, cols: 12, spacing: 10.0, start: (0.0, 0.0), style: Pipes(rel_thickness: 0.6), seed: Some(5))",
//! ).unwrap();
//! let outline = job.generate_seeded().unwrap();
//! assert!(outline.bounding_box(0, &mut job.rng()).is_ok());
//! ```
use super::styles::{Jagged, Pipes, Round, Straight};
use super::{maze, MazeStyle};
use crate::errors::{MeanderError, Result};
use crate::shapes::Shape;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// A built-in style and its settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum StyleConfig {
    Pipes { rel_thickness: f64 },
    Round { rel_thickness: f64 },
    Straight { rel_thickness: f64 },
    Jagged { min_w: f64, max_w: f64 },
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig::Straight { rel_thickness: 0.5 }
    }
}

impl StyleConfig {
    /// Checks the settings and makes the style.
    pub fn build(&self) -> Result<Box<dyn MazeStyle>> {
        Ok(match *self {
            StyleConfig::Pipes { rel_thickness } => Box::new(Pipes::new(rel_thickness)?),
            StyleConfig::Round { rel_thickness } => Box::new(Round::new(rel_thickness)?),
            StyleConfig::Straight { rel_thickness } => Box::new(Straight::new(rel_thickness)?),
            StyleConfig::Jagged { min_w, max_w } => Box::new(Jagged::new(min_w, max_w)?),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    /// Cell width.
    pub spacing: f64,
    /// Lower left corner of the grid.
    pub start: (f64, f64),
    #[serde(default)]
    pub style: StyleConfig,
    /// Fixes the random tree and any random style choices.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl MazeConfig {
    pub fn from_ron(data: &str) -> Result<MazeConfig> {
        Ok(ron::from_str(data)?)
    }

    pub fn to_ron(&self) -> Result<String> {
        ron::to_string(self).map_err(|e| MeanderError::Config(e.to_string()))
    }

    /// Seeded from `seed` when there is one, from the OS otherwise.
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> Result<Shape> {
        let style = self.style.build()?;
        maze(self.rows, self.cols, self.spacing, self.start, style.as_ref(), rng)
    }

    /// [`MazeConfig::generate`] with the job's own generator, so a seeded
    /// job always draws the same maze.
    pub fn generate_seeded(&self) -> Result<Shape> {
        self.generate(&mut self.rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const JOB: &str = "(
        rows: 6,
        cols: 9,
        spacing: 4.0,
        start: (10.0, -5.0),
        style: Jagged(min_w: 0.2, max_w: 0.5),
        seed: Some(77),
    )";

    #[test]
    fn test_parse_and_round_trip() {
        let job = MazeConfig::from_ron(JOB).unwrap();
        assert_eq!(job.rows, 6);
        assert_eq!(job.style, StyleConfig::Jagged { min_w: 0.2, max_w: 0.5 });
        let again = MazeConfig::from_ron(&job.to_ron().unwrap()).unwrap();
        assert_eq!(again, job);
    }

    #[test]
    fn test_defaults() {
        let job = MazeConfig::from_ron("(rows: 2, cols: 2, spacing: 1.0, start: (0.0, 0.0))").unwrap();
        assert_eq!(job.style, StyleConfig::default());
        assert_eq!(job.seed, None);
    }

    #[test]
    fn test_seeded_jobs_repeat() {
        let job = MazeConfig::from_ron(JOB).unwrap();
        let mut a = job.rng();
        let mut b = job.rng();
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
        let first = job.generate_seeded().unwrap().bounding_box(0, &mut a).unwrap();
        let second = job.generate_seeded().unwrap().bounding_box(0, &mut b).unwrap();
        assert_eq!(first, second);
        assert!(first.min().x >= 10.0 && first.max().x <= 46.0);
    }

    #[test]
    fn test_bad_style_or_syntax() {
        let bad = StyleConfig::Pipes { rel_thickness: 2.0 };
        assert_eq!(bad.build().unwrap_err(), MeanderError::InvalidThickness(2.0));
        assert!(matches!(
            MazeConfig::from_ron("(rows: 2"),
            Err(MeanderError::Config(_))
        ));
    }
}
