use crate::errors::{MeanderError, Result};
use crate::geom::{angle_between, rad, rotate_and_move, rotated_point};
use geo_types::Coord;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::warn;

/// What to do with an interior vertex where the line folds back on itself.
/// The offset distance is `(width / 2) / sin(angle / 2)`, with `angle` the
/// angle between the incoming and outgoing segments, which blows up as the
/// angle heads to zero.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharpJoin {
    /// Put both outline points on the centre line (offset 0) and warn.
    #[default]
    Collapse,
    /// Refuse with [`MeanderError::DegenerateJoin`].
    Fail,
}

/// Joins with an absolute angle at or under this many degrees are degenerate.
pub const MIN_JOIN_ANGLE: f64 = 10.0;

/// Outline of a stroke of `width` drawn along `points`. The result walks down
/// one side and back up the other, with square ends.
pub fn line_to_polygon(
    points: &[Coord<f64>],
    width: f64,
    policy: SharpJoin,
) -> Result<Vec<Coord<f64>>> {
    if points.len() < 2 {
        return Err(MeanderError::TooFewPoints {
            needed: 2,
            found: points.len(),
        });
    }
    let half = width / 2.0;
    let n = points.len();
    let end1 = rotate_and_move(points[0], points[1], -PI / 2.0, half);
    let end2 = rotate_and_move(points[n - 1], points[n - 2], PI / 2.0, half);
    let end3 = rotate_and_move(points[n - 1], points[n - 2], -PI / 2.0, half);
    let end4 = rotate_and_move(points[0], points[1], PI / 2.0, half);

    let mut pts = Vec::with_capacity(2 * n);
    pts.push(end1);
    for i in 1..(n - 1) {
        let mut angle = angle_between(points[i - 1], points[i], points[i + 1]);
        // (-pi, pi]; a hairpin can otherwise show up as a turn near 2 pi
        if angle > PI {
            angle -= 2.0 * PI;
        } else if angle <= -PI {
            angle += 2.0 * PI;
        }
        let dist = if angle.abs() > rad(MIN_JOIN_ANGLE) {
            half / (angle / 2.0).sin()
        } else {
            match policy {
                SharpJoin::Collapse => {
                    warn!("Join {} turns only {} rad; collapsing its offset.", i, angle);
                    0.0
                }
                SharpJoin::Fail => return Err(MeanderError::DegenerateJoin { index: i, angle }),
            }
        };
        pts.push(rotate_and_move(points[i], points[i - 1], angle / 2.0, dist));
    }
    pts.push(end2);
    pts.push(end3);
    for i in (1..(n - 1)).rev() {
        pts.push(rotated_point(pts[i], points[i], PI));
    }
    pts.push(end4);
    Ok(pts)
}
