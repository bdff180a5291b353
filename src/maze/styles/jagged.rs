use crate::errors::{MeanderError, Result};
use crate::maze::{CrossPieces, Fragment, MazeStyle, StraightPieces, TeePieces, TurnPieces};
use geo_types::coord;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Corridors whose walls wobble: every corner point is pushed a random
/// amount off the cell centre, so no two cells look alike.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Jagged {
    min_w: f64,
    max_w: f64,
}

impl Jagged {
    /// Channel widths vary between `min_w` and `max_w`, both relative to the
    /// cell and in (0, 1].
    pub fn new(min_w: f64, max_w: f64) -> Result<Jagged> {
        for w in [min_w, max_w] {
            if !(w > 0.0 && w <= 1.0) {
                return Err(MeanderError::InvalidThickness(w));
            }
        }
        if min_w > max_w {
            return Err(MeanderError::InvalidThickness(min_w));
        }
        Ok(Jagged { min_w, max_w })
    }

    /// Half a channel width.
    fn dev(&self, rng: &mut dyn RngCore) -> f64 {
        rng.gen_range((self.min_w / 2.0)..=(self.max_w / 2.0))
    }

    /// Slide along the channel.
    fn big_dev(&self, rng: &mut dyn RngCore) -> f64 {
        rng.gen_range((-self.max_w / 2.0)..=(self.max_w / 2.0))
    }
}

impl MazeStyle for Jagged {
    fn tip(&self, rng: &mut dyn RngCore) -> Fragment {
        vec![
            coord! {x: 0.5 + self.dev(rng), y: 0.5 + self.dev(rng)},
            coord! {x: 0.5 - self.dev(rng), y: 0.5 + self.dev(rng)},
        ]
    }

    fn turn(&self, rng: &mut dyn RngCore) -> TurnPieces {
        TurnPieces {
            inner: vec![coord! {x: 0.5 + self.dev(rng), y: 0.5 - self.dev(rng)}],
            outer: vec![coord! {x: 0.5 - self.dev(rng), y: 0.5 + self.dev(rng)}],
        }
    }

    fn straight(&self, rng: &mut dyn RngCore) -> StraightPieces {
        StraightPieces {
            right: vec![coord! {x: 0.5 + self.dev(rng), y: 0.5 + self.big_dev(rng)}],
            left: vec![coord! {x: 0.5 - self.dev(rng), y: 0.5 + self.big_dev(rng)}],
        }
    }

    fn tee(&self, rng: &mut dyn RngCore) -> TeePieces {
        TeePieces {
            right: vec![coord! {x: 0.5 + self.dev(rng), y: 0.5 - self.dev(rng)}],
            top: vec![coord! {x: 0.5 + self.big_dev(rng), y: 0.5 + self.dev(rng)}],
            left: vec![coord! {x: 0.5 - self.dev(rng), y: 0.5 - self.dev(rng)}],
        }
    }

    fn cross(&self, rng: &mut dyn RngCore) -> CrossPieces {
        CrossPieces {
            lower_right: vec![coord! {x: 0.5 + self.dev(rng), y: 0.5 - self.dev(rng)}],
            upper_right: vec![coord! {x: 0.5 + self.dev(rng), y: 0.5 + self.dev(rng)}],
            upper_left: vec![coord! {x: 0.5 - self.dev(rng), y: 0.5 + self.dev(rng)}],
            lower_left: vec![coord! {x: 0.5 - self.dev(rng), y: 0.5 - self.dev(rng)}],
        }
    }
}
