use geo_types::{coord, Coord};
use nalgebra::{Affine2, Matrix3, Point2 as NPoint2};

/// Helper to create a scaling matrix
pub fn scale_matrix(sx: f64, sy: f64) -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0))
}

/// Helper to create a translation matrix
pub fn translate_matrix(tx: f64, ty: f64) -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0))
}

/// Standard counter-clockwise rotation about the origin.
pub fn rotate_matrix(radians: f64) -> Affine2<f64> {
    let (sin, cos) = radians.sin_cos();
    Affine2::from_matrix_unchecked(Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0))
}

/// Exact counter-clockwise quarter turns, no trig rounding. `times` wraps mod 4.
pub fn quarter_turn_matrix(times: usize) -> Affine2<f64> {
    let (cos, sin) = match times % 4 {
        0 => (1.0, 0.0),
        1 => (0.0, 1.0),
        2 => (-1.0, 0.0),
        _ => (0.0, -1.0),
    };
    Affine2::from_matrix_unchecked(Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0))
}

/// Quarter turns about the centre of the unit cell `[0,1]x[0,1]`.
pub fn cell_rotation(times: usize) -> Affine2<f64> {
    translate_matrix(0.5, 0.5) * quarter_turn_matrix(times) * translate_matrix(-0.5, -0.5)
}

/// Helper to transform a single coord with an affine transform.
pub fn xform_coord(xy: &Coord<f64>, affine: &Affine2<f64>) -> Coord<f64> {
    let out = affine * NPoint2::new(xy.x, xy.y);
    coord!(x: out.x, y: out.y)
}

pub trait TransformCoords {
    /// Apply the transform to every coord in place.
    fn transform(&mut self, affine: &Affine2<f64>);
}

impl TransformCoords for [Coord<f64>] {
    fn transform(&mut self, affine: &Affine2<f64>) {
        for xy in self.iter_mut() {
            *xy = xform_coord(xy, affine);
        }
    }
}

impl TransformCoords for Vec<Coord<f64>> {
    fn transform(&mut self, affine: &Affine2<f64>) {
        self.as_mut_slice().transform(affine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::PointDistance;
    use std::f64::consts::PI;

    #[test]
    fn test_translate() {
        let mut pts = vec![coord! {x: 25., y: 25.}];
        pts.transform(&translate_matrix(10., 5.));
        assert!(pts[0].distance(&coord! {x: 35., y: 30.}) < 1e-8);
    }

    #[test]
    fn test_simple_rotate() {
        for (radians, source, destination) in vec![
            (PI / 2., coord! {x: 1., y: 0.}, coord! {x: 0., y: 1.}),
            (PI, coord! {x: 1., y: 0.}, coord! {x: -1., y: 0.}),
            (PI / 2., coord! {x: 0., y: 1.}, coord! {x: -1., y: 0.}),
            (
                -PI / 4.,
                coord! {x: 1., y: 0.},
                coord! {x: 0.7071067811865476, y: -0.7071067811865476},
            ),
        ] {
            let mut pts = vec![source];
            pts.transform(&rotate_matrix(radians));
            assert!(pts[0].distance(&destination) < 1e-8);
        }
    }

    #[test]
    fn test_quarter_turns_match_rotation() {
        for times in 0..4 {
            let mut exact = vec![coord! {x: 0.8, y: 0.1}];
            let mut trig = exact.clone();
            exact.transform(&quarter_turn_matrix(times));
            trig.transform(&rotate_matrix(times as f64 * PI / 2.));
            assert!(exact[0].distance(&trig[0]) < 1e-12);
        }
    }

    #[test]
    fn test_cell_rotation_moves_bottom_entry_to_right() {
        let mut pts = vec![coord! {x: 0.5, y: 0.0}];
        pts.transform(&cell_rotation(1));
        assert_eq!(pts[0], coord! {x: 1.0, y: 0.5});
        pts.transform(&cell_rotation(3));
        assert_eq!(pts[0], coord! {x: 0.5, y: 0.0});
    }

    #[test]
    fn test_scale_then_translate() {
        let mut pts = vec![coord! {x: 1., y: 2.}];
        pts.transform(&(translate_matrix(5., 5.) * scale_matrix(10., 10.)));
        assert_eq!(pts[0], coord! {x: 15., y: 25.});
    }
}
