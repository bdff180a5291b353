use super::{check_thickness, open};
use crate::errors::Result;
use crate::geom::{deg, points_on_arc, points_on_line};
use crate::maze::{
    rotated_fragment, CrossPieces, Fragment, MazeStyle, StraightPieces, TeePieces, TurnPieces,
};
use crate::shapes::Shape;
use geo_types::{coord, Coord};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Very curvy pipes: every turn is a quarter circle around the cell corner.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Round {
    rel_thickness: f64,
}

impl Round {
    pub fn new(rel_thickness: f64) -> Result<Round> {
        Ok(Round {
            rel_thickness: check_thickness(rel_thickness)?,
        })
    }

    fn w(&self) -> f64 {
        self.rel_thickness / 2.0
    }

    fn right_turn(&self) -> Fragment {
        let r = 0.5 - self.w();
        open(points_on_arc(coord! {x: 1.0, y: 0.0}, r, 180.0, 90.0, r / 2.0))
    }
}

impl MazeStyle for Round {
    fn tip(&self, _rng: &mut dyn RngCore) -> Fragment {
        let w = self.w();
        let mut pts = open(points_on_line(
            coord! {x: 0.5 + w, y: 0.0},
            coord! {x: 0.5 + w, y: 0.5},
            0.2,
        ));
        pts.extend(open(points_on_arc(coord! {x: 0.5, y: 0.5}, w, 0.0, 180.0, w / 4.0)));
        pts.extend(open(points_on_line(
            coord! {x: 0.5 - w, y: 0.5},
            coord! {x: 0.5 - w, y: 0.0},
            0.2,
        )));
        pts
    }

    fn turn(&self, _rng: &mut dyn RngCore) -> TurnPieces {
        TurnPieces {
            inner: self.right_turn(),
            outer: open(points_on_arc(coord! {x: 1.0, y: 0.0}, 0.5 + self.w(), 90.0, 180.0, 0.2)),
        }
    }

    fn straight(&self, _rng: &mut dyn RngCore) -> StraightPieces {
        let w = self.w();
        StraightPieces {
            right: vec![coord! {x: 0.5 + w, y: 0.1}, coord! {x: 0.5 + w, y: 0.9}],
            left: vec![coord! {x: 0.5 - w, y: 0.9}, coord! {x: 0.5 - w, y: 0.1}],
        }
    }

    /// The top edge is two arcs, one round each upper corner, meeting where
    /// they cross the middle of the cell.
    fn tee(&self, _rng: &mut dyn RngCore) -> TeePieces {
        let r = 0.5 + self.w();
        let theta = deg((0.5 / r).acos());
        let mut top = open(points_on_arc(coord! {x: 1.0, y: 0.0}, r, 90.0, 180.0 - theta, 0.2));
        top.extend(open(points_on_arc(coord! {x: 0.0, y: 0.0}, r, theta, 90.0, 0.2)));
        let right = self.right_turn();
        let left = rotated_fragment(&right, 3);
        TeePieces { right, top, left }
    }

    fn cross(&self, _rng: &mut dyn RngCore) -> CrossPieces {
        let w = self.w();
        let mut corner = open(points_on_line(
            coord! {x: 0.5 + w, y: 0.0},
            coord! {x: 0.5 + w, y: 0.5 - w},
            0.2,
        ));
        corner.extend(points_on_line(
            coord! {x: 0.5 + w, y: 0.5 - w},
            coord! {x: 1.0, y: 0.5 - w},
            0.2,
        ));
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
    use crate::geom::PointDistance;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_turn_arcs_share_a_centre() {
        let mut rng = SmallRng::seed_from_u64(0);
        let style = Round::new(0.5).unwrap();
        let turn = style.turn(&mut rng);
        let corner = coord! {x: 1.0, y: 0.0};
        for p in &turn.inner {
            assert!((p.distance(&corner) - 0.25).abs() < 1e-12);
        }
        for p in &turn.outer {
            assert!((p.distance(&corner) - 0.75).abs() < 1e-12);
        }
    }

    #[test]
    fn test_tee_top_arcs_meet_in_the_middle() {
        let mut rng = SmallRng::seed_from_u64(0);
        let tee = Round::new(0.5).unwrap().tee(&mut rng);
        assert!(tee.top.iter().any(|p| (p.x - 0.5).abs() < 1e-9));
        assert!(tee.top.windows(2).all(|w| w[0].x >= w[1].x - 1e-12));
        assert!(tee.top.iter().all(|p| p.y <= 0.75 + 1e-12));
    }

    #[test]
    fn test_no_piece_repeats_a_point() {
        let mut rng = SmallRng::seed_from_u64(0);
        let style = Round::new(0.4).unwrap();
        let tee = style.tee(&mut rng);
        let cross = style.cross(&mut rng);
        let turn = style.turn(&mut rng);
        for piece in [
            style.tip(&mut rng),
            turn.inner,
            turn.outer,
            tee.right,
            tee.top,
            tee.left,
            cross.lower_right,
            cross.upper_right,
            cross.upper_left,
            cross.lower_left,
        ] {
            for pair in piece.windows(2) {
                assert!(pair[0].distance(&pair[1]) > 1e-9, "{:?}", piece);
            }
        }
    }
}
