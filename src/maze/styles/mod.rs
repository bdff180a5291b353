//! Built-in ways to draw a maze. Each style is a [`super::MazeStyle`]; write
//! your own by implementing the same five pieces.
use crate::errors::{MeanderError, Result};
use geo_types::Coord;

mod jagged;
mod pipes;
mod round;
mod straight;

pub use jagged::Jagged;
pub use pipes::Pipes;
pub use round::Round;
pub use straight::Straight;

/// Drop the final point so the next piece can start where this one ends.
fn open(mut points: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
    points.pop();
    points
}

/// Channel width relative to the cell, in (0, 1].
fn check_thickness(rel_thickness: f64) -> Result<f64> {
    if rel_thickness > 0.0 && rel_thickness <= 1.0 {
        Ok(rel_thickness)
    } else {
        Err(MeanderError::InvalidThickness(rel_thickness))
    }
}
