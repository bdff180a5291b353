use super::check_thickness;
use crate::errors::Result;
use crate::maze::{CrossPieces, Fragment, MazeStyle, StraightPieces, TeePieces, TurnPieces};
use geo_types::coord;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Square corridors. Only corners get points; straight runs have none.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Straight {
    rel_thickness: f64,
}

impl Straight {
    pub fn new(rel_thickness: f64) -> Result<Straight> {
        Ok(Straight {
            rel_thickness: check_thickness(rel_thickness)?,
        })
    }

    fn w(&self) -> f64 {
        self.rel_thickness / 2.0
    }
}

impl MazeStyle for Straight {
    fn tip(&self, _rng: &mut dyn RngCore) -> Fragment {
        let w = self.w();
        vec![coord! {x: 0.5 + w, y: 0.5 + w}, coord! {x: 0.5 - w, y: 0.5 + w}]
    }

    fn turn(&self, _rng: &mut dyn RngCore) -> TurnPieces {
        let w = self.w();
        TurnPieces {
            inner: vec![coord! {x: 0.5 + w, y: 0.5 - w}],
            outer: vec![coord! {x: 0.5 - w, y: 0.5 + w}],
        }
    }

    fn straight(&self, _rng: &mut dyn RngCore) -> StraightPieces {
        StraightPieces::default()
    }

    fn tee(&self, _rng: &mut dyn RngCore) -> TeePieces {
        let w = self.w();
        TeePieces {
            right: vec![coord! {x: 0.5 + w, y: 0.5 - w}],
            top: vec![],
            left: vec![coord! {x: 0.5 - w, y: 0.5 - w}],
        }
    }

    fn cross(&self, _rng: &mut dyn RngCore) -> CrossPieces {
        let w = self.w();
        CrossPieces {
            lower_right: vec![coord! {x: 0.5 + w, y: 0.5 - w}],
            upper_right: vec![coord! {x: 0.5 + w, y: 0.5 + w}],
            upper_left: vec![coord! {x: 0.5 - w, y: 0.5 + w}],
            lower_left: vec![coord! {x: 0.5 - w, y: 0.5 - w}],
        }
    }
}
