//! Meandering strands built on a chain of dynamic points.
//!
//! A [`Backbone`] is a start point followed by [`Point::moved`] steps, each
//! heading off from the one before. Give the steps random walk directions and
//! the strand wanders; make those walks animated and it wriggles from frame
//! to frame. [`filament`] and [`tentacle`] dress a backbone up as shapes
//! without evaluating anything; [`tree`] grows a branching cousin.
//!
//! ```rust
//! use meander::filaments::{filament, Backbone};
//! use meander::param::Param;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(4);
//! let spine = Backbone::wander(
//!     (0.0, 0.0),
//!     Param::uniform(0.0, 360.0),
//!     Param::uniform(-20.0, 20.0),
//!     10.0,
//!     30,
//! );
//! let segments = filament(&spine, Param::uniform(4.0, 8.0));
//! assert_eq!(segments.len(), 30);
//! for t in 0..3 {
//!     for s in &segments {
//!         s.to_geometry(t, &mut rng);
//!     }
//! }
//! ```
use crate::errors::{MeanderError, Result};
use crate::geom::rad;
use crate::geom::stroke::{line_to_polygon, SharpJoin};
use crate::param::Param;
use crate::point::Point;
use crate::shapes::{Line, Polygon, Shape, Spline};
use rand::{Rng, RngCore};

/// Centre line of a strand. `directions[i]` (degrees) heads from `points[i]`
/// to `points[i + 1]`.
#[derive(Debug, Clone)]
pub struct Backbone {
    points: Vec<Point>,
    directions: Vec<Param>,
}

impl Backbone {
    pub fn new(start: impl Into<Point>) -> Backbone {
        Backbone {
            points: vec![start.into()],
            directions: vec![],
        }
    }

    /// Add a point `distance` away from the current end, heading `direction`.
    pub fn push(&mut self, direction: impl Into<Param>, distance: impl Into<Param>) {
        let direction = direction.into();
        let end = self.points[self.points.len() - 1].clone();
        self.points.push(Point::moved(end, direction.clone(), distance));
        self.directions.push(direction);
    }

    /// `segments` steps starting out along `direction`, each turning by a
    /// fresh copy of `turn` from the heading before it and running a fresh
    /// copy of `distance`.
    pub fn wander(
        start: impl Into<Point>,
        direction: impl Into<Param>,
        turn: impl Into<Param>,
        distance: impl Into<Param>,
        segments: usize,
    ) -> Backbone {
        let turn = turn.into();
        let distance = distance.into();
        let mut out = Backbone::new(start);
        let mut heading = direction.into();
        for i in 0..segments {
            if i > 0 {
                heading = &heading + turn.fork();
            }
            out.push(heading.clone(), distance.fork());
        }
        out
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn directions(&self) -> &[Param] {
        &self.directions
    }

    pub fn segments(&self) -> usize {
        self.directions.len()
    }

    /// Frozen outline of the backbone stroked `width` wide at frame `t`.
    pub fn stroke(
        &self,
        width: f64,
        t: usize,
        rng: &mut dyn RngCore,
        policy: SharpJoin,
    ) -> Result<Shape> {
        let centre: Vec<_> = self.points.iter().map(|p| p.state(t, rng)).collect();
        Ok(Shape::polygon(line_to_polygon(&centre, width, policy)?))
    }

    /// Pairs of points either side of each backbone point for joints
    /// `..until`. Ends sit `widths[i] / 2` out square to their segment; inner
    /// joints lie on the bisector of the turn, pushed far enough out that both
    /// segments keep their full width (a mitre).
    fn sides(&self, widths: &[Param], until: usize) -> Vec<(Point, Point)> {
        let n = self.points.len();
        let mut pairs = Vec::with_capacity(until);
        for i in 0..until {
            let half = &widths[i] / 2.0;
            let (left, right, dist) = if i == 0 || i == n - 1 {
                let d = &self.directions[i.min(n - 2)];
                (d + 90.0, d - 90.0, half)
            } else {
                let (before, after) = (&self.directions[i - 1], &self.directions[i]);
                let angle = (180.0 + (before - after)) / 2.0;
                let dist = &half / angle.map(|a| rad(a).sin());
                let left = after + &angle;
                let right = &left + 180.0;
                (left, right, dist)
            };
            pairs.push((
                Point::moved(&self.points[i], left, &dist),
                Point::moved(&self.points[i], right, &dist),
            ));
        }
        pairs
    }

    fn check_length(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(MeanderError::TooFewPoints {
                needed: 2,
                found: self.points.len(),
            });
        }
        Ok(())
    }
}

/// One four-sided polygon per backbone segment. Each joint gets its own copy
/// of `width`, so a random width varies along the strand.
pub fn filament(backbone: &Backbone, width: impl Into<Param>) -> Vec<Shape> {
    if backbone.check_length().is_err() {
        return vec![];
    }
    let width = width.into();
    let widths: Vec<Param> = backbone.points.iter().map(|_| width.fork()).collect();
    let pairs = backbone.sides(&widths, backbone.points.len());
    pairs
        .windows(2)
        .map(|w| {
            Shape::Polygon(Polygon {
                points: vec![w[0].0.clone(), w[0].1.clone(), w[1].1.clone(), w[1].0.clone()],
            })
        })
        .collect()
}

/// A closed spline tapering from `width` at the start to a point at the end.
pub fn tentacle(backbone: &Backbone, width: impl Into<Param>) -> Result<Shape> {
    backbone.check_length()?;
    let width = width.into();
    let n = backbone.points.len();
    let step = &width / (n - 1) as f64;
    let mut widths = vec![width];
    for i in 1..(n - 1) {
        let next = &widths[i - 1] - &step;
        widths.push(next);
    }
    let pairs = backbone.sides(&widths, n - 1);
    let mut points: Vec<Point> = pairs.iter().map(|(l, _)| l.clone()).collect();
    points.extend(pairs.iter().rev().map(|(_, r)| r.clone()));
    Ok(Shape::Spline(Spline {
        points,
        smoothing: 0.3,
        circular: true,
    }))
}

/// A randomly branching tree of line segments rooted at `start`.
///
/// Each branch heads along its parent's direction turned by `theta / 2`
/// either way and runs a fresh copy of `length`. A branch splits with
/// probability `p`, which drops by `p_delta` at every level, so the tree
/// always ends. The branching is decided here; the lines themselves stay
/// lazy, so an animated `direction` makes the whole tree sway.
pub fn tree(
    start: impl Into<Point>,
    direction: impl Into<Param>,
    length: impl Into<Param>,
    theta: f64,
    p: f64,
    p_delta: f64,
    rng: &mut dyn RngCore,
) -> Result<Vec<Shape>> {
    if !(p_delta > 0.0) {
        return Err(MeanderError::InvalidBranching(p_delta));
    }
    let length = length.into();
    let mut lines = vec![];
    let mut pending = vec![(start.into(), direction.into(), p)];
    while let Some((from, heading, p)) = pending.pop() {
        let end = Point::moved(&from, &heading, length.fork());
        lines.push(Shape::Line(Line {
            points: vec![from, end.clone()],
        }));
        if rng.gen::<f64>() < p {
            pending.push((end.clone(), &heading - theta / 2.0, p - p_delta));
            pending.push((end, &heading + theta / 2.0, p - p_delta));
        }
    }
    Ok(lines)
}
