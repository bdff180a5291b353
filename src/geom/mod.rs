use geo_types::{coord, Coord};
use matrix::{rotate_matrix, scale_matrix, translate_matrix, TransformCoords};
use rand::{Rng, RngCore};
use std::f64::consts::PI;

/// Affine helpers (nalgebra backed) for moving whole point lists around,
/// including exact quarter turns inside a unit grid cell.
pub mod matrix;

/// Turning a polyline into the outline of a stroke of given width.
pub mod stroke;

/// Trait that implements a distance function between two [`geo_types::Coord`]s.
/// Also includes a length function which returns the length of a coord
/// as if it were a Vector.
pub trait PointDistance {
    /// Return the scalar distance between two coords.
    fn distance(&self, other: &Coord<f64>) -> f64;

    /// Treat a coord as a Vector and return its scalar length.
    fn length(&self) -> f64;
}

impl PointDistance for Coord<f64> {
    fn distance(&self, other: &Coord<f64>) -> f64 {
        (*self - *other).length()
    }

    fn length(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }
}

/// Degrees to radians.
pub fn rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Radians to degrees.
pub fn deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// The point `distance` away from `start` in direction `angle` (radians).
pub fn endpoint(start: Coord<f64>, angle: f64, distance: f64) -> Coord<f64> {
    coord! {x: start.x + angle.cos() * distance, y: start.y + angle.sin() * distance}
}

/// The point `distance` away from `start` heading towards `target`.
pub fn move_toward(start: Coord<f64>, target: Coord<f64>, distance: f64) -> Coord<f64> {
    let angle = (target.y - start.y).atan2(target.x - start.x);
    endpoint(start, angle, distance)
}

/// Rotate `reference` around `start` by `angle` radians, then step
/// `distance` from `start` towards the rotated reference.
pub fn rotate_and_move(
    start: Coord<f64>,
    reference: Coord<f64>,
    angle: f64,
    distance: f64,
) -> Coord<f64> {
    let toward = rotated_point(reference, start, angle);
    move_toward(start, toward, distance)
}

pub fn distance(p1: Coord<f64>, p2: Coord<f64>) -> f64 {
    p1.distance(&p2)
}

/// Direction of `p2` as seen from `p1`, in degrees.
pub fn direction_to(p1: Coord<f64>, p2: Coord<f64>) -> f64 {
    deg((p2.y - p1.y).atan2(p2.x - p1.x))
}

pub fn midpoint(p1: Coord<f64>, p2: Coord<f64>) -> Coord<f64> {
    coord! {x: (p1.x + p2.x) / 2.0, y: (p1.y + p2.y) / 2.0}
}

/// Signed angle in radians between segments p2->p1 and p2->p3.
pub fn angle_between(p1: Coord<f64>, p2: Coord<f64>, p3: Coord<f64>) -> f64 {
    let dir1 = (p1.y - p2.y).atan2(p1.x - p2.x);
    let dir2 = (p3.y - p2.y).atan2(p3.x - p2.x);
    dir2 - dir1
}

/// Index of the point in `points` closest to `target`, or None if empty.
pub fn get_nearest(points: &[Coord<f64>], target: Coord<f64>) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, p.distance(&target)))
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

/// Width of the x range covered by `points`; zero for an empty list.
pub fn horizontal_range(points: &[Coord<f64>]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let min = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    max - min
}

pub fn translated_point(point: Coord<f64>, dx: f64, dy: f64) -> Coord<f64> {
    coord! {x: point.x + dx, y: point.y + dy}
}

/// Rotate `point` counter-clockwise around `pivot` by `angle` radians.
pub fn rotated_point(point: Coord<f64>, pivot: Coord<f64>, angle: f64) -> Coord<f64> {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    coord! {
        x: dx * cos - dy * sin + pivot.x,
        y: dy * cos + dx * sin + pivot.y
    }
}

/// Scale a point's coordinates about the origin.
pub fn scaled_point(point: Coord<f64>, cx: f64, cy: f64) -> Coord<f64> {
    coord! {x: point.x * cx, y: point.y * cy}
}

pub fn translate_points(points: &mut [Coord<f64>], dx: f64, dy: f64) {
    points.transform(&translate_matrix(dx, dy));
}

/// Rotate every point counter-clockwise around `pivot` by `angle` radians.
pub fn rotate_points(points: &mut [Coord<f64>], pivot: Coord<f64>, angle: f64) {
    let about = translate_matrix(pivot.x, pivot.y)
        * rotate_matrix(angle)
        * translate_matrix(-pivot.x, -pivot.y);
    points.transform(&about);
}

pub fn scale_points(points: &mut [Coord<f64>], cx: f64, cy: f64) {
    points.transform(&scale_matrix(cx, cy));
}

/// Nudge every point a uniformly random distance (up to `r`) in a uniformly
/// random direction, so the jitter is denser towards the original spot.
pub fn jitter_points(points: &mut [Coord<f64>], r: f64, rng: &mut dyn RngCore) {
    for p in points.iter_mut() {
        let angle = rng.gen_range(0.0..(2.0 * PI));
        let dist = if r > 0.0 { rng.gen_range(0.0..r) } else { 0.0 };
        *p = endpoint(*p, angle, dist);
    }
}

/// Like [`jitter_points`] but leaves the input alone.
pub fn jittered_points(points: &[Coord<f64>], r: f64, rng: &mut dyn RngCore) -> Vec<Coord<f64>> {
    let mut out = points.to_vec();
    jitter_points(&mut out, r, rng);
    out
}

fn segment_count(length: f64, spacing: f64) -> usize {
    if spacing > 0.0 && length.is_finite() {
        ((length / spacing).ceil() as usize).max(1)
    } else {
        1
    }
}

/// Evenly spaced points from `p1` to `p2` (both included), no further apart
/// than `spacing`.
pub fn points_on_line(p1: Coord<f64>, p2: Coord<f64>, spacing: f64) -> Vec<Coord<f64>> {
    let n = segment_count(p1.distance(&p2), spacing);
    (0..=n)
        .map(|i| {
            let f = i as f64 / n as f64;
            coord! {x: p1.x + (p2.x - p1.x) * f, y: p1.y + (p2.y - p1.y) * f}
        })
        .collect()
}

/// Evenly spaced points along a circular arc, from `start` to `end`
/// (degrees, either direction), both ends included. `spacing` is measured
/// along the arc.
pub fn points_on_arc(
    center: Coord<f64>,
    radius: f64,
    start: f64,
    end: f64,
    spacing: f64,
) -> Vec<Coord<f64>> {
    let sweep = rad(end - start);
    let n = segment_count((sweep * radius).abs(), spacing);
    (0..=n)
        .map(|i| {
            let angle = rad(start) + sweep * (i as f64 / n as f64);
            endpoint(center, angle, radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Coord<f64>, b: Coord<f64>) -> bool {
        a.distance(&b) < 1e-9
    }

    #[test]
    fn test_length() {
        let p = coord! {x: 10.0, y: 0.0};
        assert!((p.length() - 10.0).abs() < 0.0001)
    }

    #[test]
    fn test_distance() {
        let d = distance(coord! {x: 10.0, y: 0.0}, coord! {x: 0.0, y: 10.0});
        assert!((d - 200.0f64.sqrt()).abs() < 0.0001)
    }

    #[test]
    fn test_rad_deg() {
        assert!((rad(180.0) - PI).abs() < 1e-12);
        assert!((deg(PI / 2.0) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_endpoint_and_direction() {
        let p = endpoint(coord! {x: 1.0, y: 1.0}, rad(90.0), 2.0);
        assert!(close(p, coord! {x: 1.0, y: 3.0}));
        assert!((direction_to(coord! {x: 0.0, y: 0.0}, coord! {x: -1.0, y: 0.0}) - 180.0).abs() < 1e-9);
        let q = move_toward(coord! {x: 0.0, y: 0.0}, coord! {x: 3.0, y: 4.0}, 10.0);
        assert!(close(q, coord! {x: 6.0, y: 8.0}));
    }

    #[test]
    fn test_rotated_point() {
        let p = rotated_point(coord! {x: 2.0, y: 1.0}, coord! {x: 1.0, y: 1.0}, PI / 2.0);
        assert!(close(p, coord! {x: 1.0, y: 2.0}));
    }

    #[test]
    fn test_angle_between_right_angle() {
        let a = angle_between(
            coord! {x: 1.0, y: 0.0},
            coord! {x: 0.0, y: 0.0},
            coord! {x: 0.0, y: 1.0},
        );
        assert!((a - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_get_nearest() {
        let pts = vec![
            coord! {x: 0.0, y: 0.0},
            coord! {x: 5.0, y: 5.0},
            coord! {x: 1.0, y: 1.0},
        ];
        assert_eq!(get_nearest(&pts, coord! {x: 1.2, y: 0.9}), Some(2));
        assert_eq!(get_nearest(&[], coord! {x: 0.0, y: 0.0}), None);
        assert!((horizontal_range(&pts) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_list_transforms() {
        let mut pts = vec![coord! {x: 2.0, y: 1.0}, coord! {x: 3.0, y: 1.0}];
        rotate_points(&mut pts, coord! {x: 2.0, y: 1.0}, PI / 2.0);
        assert!(pts[0].distance(&coord! {x: 2.0, y: 1.0}) < 1e-12);
        assert!(pts[1].distance(&coord! {x: 2.0, y: 2.0}) < 1e-12);
        translate_points(&mut pts, -2.0, 1.0);
        scale_points(&mut pts, 3.0, -1.0);
        assert!(pts[1].distance(&coord! {x: 0.0, y: -3.0}) < 1e-12);
        assert!(pts[0].distance(&coord! {x: 0.0, y: -2.0}) < 1e-12);
    }

    #[test]
    fn test_points_on_line_spacing() {
        let pts = points_on_line(coord! {x: 0.0, y: 0.0}, coord! {x: 1.0, y: 0.0}, 0.3);
        assert_eq!(pts.len(), 5);
        assert!(close(pts[0], coord! {x: 0.0, y: 0.0}));
        assert!(close(pts[4], coord! {x: 1.0, y: 0.0}));
        for w in pts.windows(2) {
            assert!(w[0].distance(&w[1]) <= 0.3 + 1e-12);
        }
    }

    #[test]
    fn test_points_on_arc_clockwise() {
        let pts = points_on_arc(coord! {x: 0.0, y: 0.0}, 1.0, 180.0, 90.0, 0.1);
        assert!(close(pts[0], coord! {x: -1.0, y: 0.0}));
        assert!(close(*pts.last().unwrap(), coord! {x: 0.0, y: 1.0}));
        for p in &pts {
            assert!((p.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_jitter_stays_within_radius() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        let pts = vec![coord! {x: 3.0, y: 3.0}; 50];
        let out = jittered_points(&pts, 0.5, &mut rng);
        assert_eq!(pts[0], coord! {x: 3.0, y: 3.0});
        for p in out {
            assert!(p.distance(&pts[0]) <= 0.5 + 1e-12);
        }
    }
}
