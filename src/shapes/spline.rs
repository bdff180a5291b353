use crate::geom::{direction_to, distance, endpoint, rad, rotated_point};
use geo_types::{coord, Coord};
use kurbo::{BezPath, PathEl, Point as BezPoint};
use std::f64::consts::PI;

fn bez(c: Coord<f64>) -> BezPoint {
    BezPoint::new(c.x, c.y)
}

/// Control point for `points[i]`: parallel to the chord through its two
/// neighbours, `smoothing` times that chord's length away.
fn control(prev: Coord<f64>, here: Coord<f64>, next: Coord<f64>, smoothing: f64) -> Coord<f64> {
    endpoint(here, rad(direction_to(next, prev)), smoothing * distance(next, prev))
}

/// Smooth cubic path through every point.
///
/// An open spline gets a mirrored phantom point past each end so it finishes
/// heading straight at its end points; a circular one wraps around and closes
/// smoothly. `None` with fewer than two points.
pub fn spline_path(points: &[Coord<f64>], smoothing: f64, circular: bool) -> Option<BezPath> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len();
    let mut ext = Vec::with_capacity(n + 3);
    if circular {
        ext.push(points[n - 1]);
        ext.extend_from_slice(points);
        ext.push(points[0]);
        ext.push(points[1]);
    } else {
        ext.push(rotated_point(points[1], points[0], PI));
        ext.extend_from_slice(points);
        ext.push(rotated_point(points[n - 2], points[n - 1], PI));
    }

    let mut path = BezPath::new();
    path.move_to(bez(ext[1]));
    // first segment: the leading control mirrors ext[2] back through ext[1]
    let c1 = control(ext[2], ext[1], ext[0], smoothing);
    let mut c2 = control(ext[1], ext[2], ext[3], smoothing);
    path.curve_to(bez(c1), bez(c2), bez(ext[2]));
    for i in 3..(ext.len() - 1) {
        // smooth continuation: reflect the last control through the joint
        let joint = ext[i - 1];
        let lead = coord! {x: 2.0 * joint.x - c2.x, y: 2.0 * joint.y - c2.y};
        c2 = control(ext[i - 1], ext[i], ext[i + 1], smoothing);
        path.curve_to(bez(lead), bez(c2), bez(ext[i]));
    }
    Some(path)
}

/// The spline flattened to a polyline within `tolerance`.
pub fn flatten_spline(
    points: &[Coord<f64>],
    smoothing: f64,
    circular: bool,
    tolerance: f64,
) -> Vec<Coord<f64>> {
    let mut out = Vec::new();
    match spline_path(points, smoothing, circular) {
        Some(path) => path.flatten(tolerance, |el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => out.push(coord! {x: p.x, y: p.y}),
            _ => {}
        }),
        None => out.extend_from_slice(points),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::PointDistance;

    #[test]
    fn test_too_short() {
        assert!(spline_path(&[coord! {x: 1.0, y: 1.0}], 0.3, false).is_none());
        let single = flatten_spline(&[coord! {x: 1.0, y: 1.0}], 0.3, false, 0.01);
        assert_eq!(single, vec![coord! {x: 1.0, y: 1.0}]);
    }

    #[test]
    fn test_open_spline_hits_every_point() {
        let pts = vec![
            coord! {x: 0.0, y: 0.0},
            coord! {x: 10.0, y: 5.0},
            coord! {x: 20.0, y: 0.0},
            coord! {x: 30.0, y: 5.0},
        ];
        let flat = flatten_spline(&pts, 0.3, false, 0.01);
        assert!(flat[0].distance(&pts[0]) < 1e-9);
        assert!(flat.last().unwrap().distance(&pts[3]) < 1e-9);
        for p in &pts {
            assert!(flat.iter().any(|f| f.distance(p) < 1e-9));
        }
    }

    #[test]
    fn test_circular_spline_closes() {
        let pts = vec![
            coord! {x: 1.0, y: 0.0},
            coord! {x: 0.0, y: 1.0},
            coord! {x: -1.0, y: 0.0},
            coord! {x: 0.0, y: -1.0},
        ];
        let flat = flatten_spline(&pts, 0.3, true, 0.001);
        assert!(flat[0].distance(flat.last().unwrap()) < 1e-9);
        // roughly round
        for p in &flat {
            assert!((p.length() - 1.0).abs() < 0.15, "{:?}", p);
        }
    }
}
