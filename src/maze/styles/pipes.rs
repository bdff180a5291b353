use super::{check_thickness, open};
use crate::errors::Result;
use crate::geom::{points_on_arc, points_on_line};
use crate::maze::{
    rotated_fragment, CrossPieces, Fragment, MazeStyle, StraightPieces, TeePieces, TurnPieces,
};
use crate::shapes::Shape;
use geo_types::{coord, Coord};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Round-cornered pipes. Corners bend with a radius that shrinks as the
/// channel gets wider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pipes {
    rel_thickness: f64,
}

impl Pipes {
    /// `rel_thickness` is the channel width relative to the cell, in (0, 1].
    pub fn new(rel_thickness: f64) -> Result<Pipes> {
        Ok(Pipes {
            rel_thickness: check_thickness(rel_thickness)?,
        })
    }

    fn w(&self) -> f64 {
        self.rel_thickness / 2.0
    }

    fn right_turn(&self) -> Fragment {
        let w = self.w();
        let r_in = (0.5 - w) * self.rel_thickness;
        let mut pts = open(points_on_line(
            coord! {x: 0.5 + w, y: 0.0},
            coord! {x: 0.5 + w, y: 0.5 - w - r_in},
            0.1,
        ));
        pts.extend(open(points_on_arc(
            coord! {x: 0.5 + w + r_in, y: 0.5 - w - r_in},
            r_in,
            180.0,
            90.0,
            0.03,
        )));
        pts.extend(open(points_on_line(
            coord! {x: 0.5 + w + r_in, y: 0.5 - w},
            coord! {x: 1.0, y: 0.5 - w},
            0.1,
        )));
        pts
    }
}

impl MazeStyle for Pipes {
    fn tip(&self, _rng: &mut dyn RngCore) -> Fragment {
        let w = self.w();
        let mut pts = open(points_on_line(
            coord! {x: 0.5 + w, y: 0.0},
            coord! {x: 0.5 + w, y: 0.5},
            w / 2.0,
        ));
        pts.extend(open(points_on_arc(coord! {x: 0.5, y: 0.5}, w, 0.0, 180.0, w / 2.0)));
        pts.extend(open(points_on_line(
            coord! {x: 0.5 - w, y: 0.5},
            coord! {x: 0.5 - w, y: 0.0},
            w / 2.0,
        )));
        pts
    }

    fn turn(&self, _rng: &mut dyn RngCore) -> TurnPieces {
        let w = self.w();
        let mut outer = open(points_on_line(
            coord! {x: 1.0, y: 0.5 + w},
            coord! {x: 0.5, y: 0.5 + w},
            0.1,
        ));
        outer.extend(open(points_on_arc(coord! {x: 0.5, y: 0.5}, w, 90.0, 180.0, w / 2.0)));
        outer.extend(open(points_on_line(
            coord! {x: 0.5 - w, y: 0.5},
            coord! {x: 0.5 - w, y: 0.0},
            0.1,
        )));
        TurnPieces {
            inner: self.right_turn(),
            outer,
        }
    }

    fn straight(&self, _rng: &mut dyn RngCore) -> StraightPieces {
        let w = self.w();
        StraightPieces {
            right: vec![coord! {x: 0.5 + w, y: 0.1}, coord! {x: 0.5 + w, y: 0.9}],
            left: vec![coord! {x: 0.5 - w, y: 0.9}, coord! {x: 0.5 - w, y: 0.1}],
        }
    }

    fn tee(&self, _rng: &mut dyn RngCore) -> TeePieces {
        let w = self.w();
        let right = self.right_turn();
        let left = rotated_fragment(&right, 3);
        TeePieces {
            right,
            top: vec![coord! {x: 0.9, y: 0.5 + w}, coord! {x: 0.1, y: 0.5 + w}],
            left,
        }
    }

    fn cross(&self, _rng: &mut dyn RngCore) -> CrossPieces {
        let corner = self.right_turn();
        CrossPieces {
            upper_right: rotated_fragment(&corner, 1),
            upper_left: rotated_fragment(&corner, 2),
            lower_left: rotated_fragment(&corner, 3),
            lower_right: corner,
        }
    }

    fn output(&self, points: Vec<Coord<f64>>) -> Shape {
        Shape::spline(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MeanderError;
    use crate::geom::PointDistance;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_thickness_checked() {
        assert_eq!(Pipes::new(0.0), Err(MeanderError::InvalidThickness(0.0)));
        assert_eq!(Pipes::new(1.5), Err(MeanderError::InvalidThickness(1.5)));
        assert!(Pipes::new(1.0).is_ok());
    }

    #[test]
    fn test_right_turn_runs_bottom_to_right() {
        let mut rng = SmallRng::seed_from_u64(0);
        let p = Pipes::new(0.4).unwrap();
        let inner = p.turn(&mut rng).inner;
        assert_eq!(inner[0], coord! {x: 0.7, y: 0.0});
        let last = inner.last().unwrap();
        assert!((last.y - 0.3).abs() < 1e-12);
        assert!(last.x < 1.0 && last.x > 0.85);
        for pair in inner.windows(2) {
            assert!(pair[0].distance(&pair[1]) <= 0.1 + 1e-9);
        }
    }

    #[test]
    fn test_tee_sides_mirror() {
        let mut rng = SmallRng::seed_from_u64(0);
        let p = Pipes::new(0.5).unwrap();
        let tee = p.tee(&mut rng);
        // left piece starts on the left edge, where the right piece ends on the right
        assert!(tee.left[0].x.abs() < 1e-12);
        assert!((tee.left[0].y - 0.25).abs() < 1e-12);
        assert_eq!(tee.right.len(), tee.left.len());
    }
}
