//! The small shape model the generators produce.
//!
//! Shapes hold dynamic [`Point`]s and [`Param`]s, so moving one around just
//! wraps its points in transform nodes; nothing is computed until a frame is
//! asked for with [`Shape::to_geometry`] or one of the bounding box helpers.
use crate::errors::{MeanderError, Result};
use crate::geom::{rad, rotated_point};
use crate::param::Param;
use crate::point::Point;
use geo::BoundingRect;
use geo_types::{coord, Coord, Geometry, GeometryCollection, LineString, MultiPoint, Polygon as GeoPolygon, Rect};
use num_traits::FromPrimitive;
use rand::RngCore;
use std::f64::consts::PI;

pub mod spline;

/// Curve flattening tolerance used by [`Shape::to_geometry`].
pub const FLATTEN_ACCURACY: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct Polygon {
    pub points: Vec<Point>,
}

/// Smooth curve through its points. `smoothing` is the control point distance
/// relative to the distance between the neighbouring points.
#[derive(Debug, Clone)]
pub struct Spline {
    pub points: Vec<Point>,
    pub smoothing: f64,
    pub circular: bool,
}

/// An open polyline.
#[derive(Debug, Clone)]
pub struct Line {
    pub points: Vec<Point>,
}

#[derive(Debug, Clone)]
pub struct Circle {
    pub center: Point,
    pub radius: Param,
}

/// Shapes drawn together, visible only inside `clip` when it's non-empty.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub members: Vec<Shape>,
    pub clip: Vec<Shape>,
}

impl Group {
    pub fn new(members: Vec<Shape>) -> Group {
        Group {
            members,
            clip: vec![],
        }
    }

    pub fn with_clip(mut self, clip: Vec<Shape>) -> Group {
        self.clip = clip;
        self
    }
}

#[derive(Debug, Clone)]
pub enum Shape {
    Polygon(Polygon),
    Spline(Spline),
    Line(Line),
    Circle(Circle),
    Group(Group),
}

fn fixed_points(coords: Vec<Coord<f64>>) -> Vec<Point> {
    coords.into_iter().map(Point::from).collect()
}

fn states(points: &[Point], t: usize, rng: &mut dyn RngCore) -> Vec<Coord<f64>> {
    points.iter().map(|p| p.state(t, rng)).collect()
}

/// Closed ring approximating a circle, as many sides as the radius warrants.
fn circle_ring(center: Coord<f64>, radius: f64) -> LineString<f64> {
    let radius = radius.abs();
    let sides = 1000.min(32.max(usize::from_f64(radius).unwrap_or(1000) * 4));
    let mut ring: Vec<Coord<f64>> = (0..sides)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / sides as f64;
            coord! {x: center.x + radius * angle.cos(), y: center.y + radius * angle.sin()}
        })
        .collect();
    ring.push(ring[0]);
    LineString::new(ring)
}

fn closed(mut coords: Vec<Coord<f64>>) -> LineString<f64> {
    if let (Some(first), Some(last)) = (coords.first().copied(), coords.last()) {
        if first != *last {
            coords.push(first);
        }
    }
    LineString::new(coords)
}

impl Shape {
    pub fn polygon(coords: Vec<Coord<f64>>) -> Shape {
        Shape::Polygon(Polygon {
            points: fixed_points(coords),
        })
    }

    /// Open spline with the default smoothing of 0.3.
    pub fn spline(coords: Vec<Coord<f64>>) -> Shape {
        Shape::Spline(Spline {
            points: fixed_points(coords),
            smoothing: 0.3,
            circular: false,
        })
    }

    pub fn line(coords: Vec<Coord<f64>>) -> Shape {
        Shape::Line(Line {
            points: fixed_points(coords),
        })
    }

    pub fn circle(center: impl Into<Point>, radius: impl Into<Param>) -> Shape {
        Shape::Circle(Circle {
            center: center.into(),
            radius: radius.into(),
        })
    }

    fn for_each_point(&mut self, f: &mut dyn FnMut(&mut Point)) {
        match self {
            Shape::Polygon(Polygon { points })
            | Shape::Spline(Spline { points, .. })
            | Shape::Line(Line { points }) => points.iter_mut().for_each(|p| f(p)),
            Shape::Circle(c) => f(&mut c.center),
            Shape::Group(g) => {
                for s in g.members.iter_mut().chain(g.clip.iter_mut()) {
                    s.for_each_point(f);
                }
            }
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.for_each_point(&mut |p| *p = Point::translation(p.clone(), (dx, dy)));
    }

    /// Rotate counter-clockwise by `angle` degrees about `pivot`.
    pub fn rotate(&mut self, angle: f64, pivot: Coord<f64>) {
        let radians = rad(angle);
        self.for_each_point(&mut |p| *p = Point::rotation(p.clone(), pivot, radians));
    }

    /// Scale about the origin. Circle radii scale by `|cx|`.
    pub fn scale(&mut self, cx: f64, cy: f64) {
        self.for_each_point(&mut |p| *p = Point::scaling(p.clone(), cx, cy));
        self.scale_radii(cx.abs());
    }

    fn scale_radii(&mut self, factor: f64) {
        match self {
            Shape::Circle(c) => c.radius = &c.radius * factor,
            Shape::Group(g) => {
                for s in g.members.iter_mut().chain(g.clip.iter_mut()) {
                    s.scale_radii(factor);
                }
            }
            _ => {}
        }
    }

    /// Points that pin down this shape's extent at frame `t`, after rotating
    /// them by `rotation` radians about the origin.
    fn extent(&self, t: usize, rng: &mut dyn RngCore, rotation: f64, out: &mut Vec<Coord<f64>>) {
        let origin = coord! {x: 0.0, y: 0.0};
        match self {
            Shape::Polygon(Polygon { points })
            | Shape::Spline(Spline { points, .. })
            | Shape::Line(Line { points }) => {
                for p in points {
                    out.push(rotated_point(p.state(t, rng), origin, rotation));
                }
            }
            Shape::Circle(c) => {
                let center = rotated_point(c.center.state(t, rng), origin, rotation);
                let r = c.radius.state(t, rng).abs();
                out.push(coord! {x: center.x - r, y: center.y - r});
                out.push(coord! {x: center.x + r, y: center.y + r});
            }
            Shape::Group(g) => {
                let inner = if g.clip.is_empty() { &g.members } else { &g.clip };
                for s in inner {
                    s.extent(t, rng, rotation, out);
                }
            }
        }
    }

    /// Axis-aligned bounds at frame `t`. A group with a clip is bounded by
    /// its clip.
    pub fn bounding_box(&self, t: usize, rng: &mut dyn RngCore) -> Result<Rect<f64>> {
        bounding_box(std::slice::from_ref(self), t, rng)
    }

    /// Evaluate at frame `t` into plain geometry. Splines are flattened and
    /// circles become polygons; group clips are not applied.
    pub fn to_geometry(&self, t: usize, rng: &mut dyn RngCore) -> Geometry<f64> {
        match self {
            Shape::Polygon(p) => {
                Geometry::Polygon(GeoPolygon::new(closed(states(&p.points, t, rng)), vec![]))
            }
            Shape::Spline(s) => {
                let coords = states(&s.points, t, rng);
                let flat = spline::flatten_spline(&coords, s.smoothing, s.circular, FLATTEN_ACCURACY);
                Geometry::LineString(LineString::new(flat))
            }
            Shape::Line(l) => Geometry::LineString(LineString::new(states(&l.points, t, rng))),
            Shape::Circle(c) => {
                let center = c.center.state(t, rng);
                let radius = c.radius.state(t, rng);
                Geometry::Polygon(GeoPolygon::new(circle_ring(center, radius), vec![]))
            }
            Shape::Group(g) => Geometry::GeometryCollection(GeometryCollection::new_from(
                g.members.iter().map(|s| s.to_geometry(t, rng)).collect(),
            )),
        }
    }
}

/// Bounds of several shapes together at frame `t`.
pub fn bounding_box(shapes: &[Shape], t: usize, rng: &mut dyn RngCore) -> Result<Rect<f64>> {
    rotated_bounding_box(shapes, 0.0, t, rng)
}

/// Bounds in a frame turned by `angle` degrees: the shapes are rotated by
/// `-angle` about the origin first. Anything built inside these bounds has
/// to be rotated by `angle` about the origin to line up with the shapes.
pub fn rotated_bounding_box(
    shapes: &[Shape],
    angle: f64,
    t: usize,
    rng: &mut dyn RngCore,
) -> Result<Rect<f64>> {
    let mut extent = vec![];
    for shape in shapes {
        shape.extent(t, rng, rad(-angle), &mut extent);
    }
    MultiPoint::from(extent)
        .bounding_rect()
        .ok_or(MeanderError::EmptyBounds)
}

/// Grow (or with a negative margin, shrink) a box on every side.
pub fn add_margin(bounds: Rect<f64>, margin: f64) -> Rect<f64> {
    Rect::new(
        coord! {x: bounds.min().x - margin, y: bounds.min().y - margin},
        coord! {x: bounds.max().x + margin, y: bounds.max().y + margin},
    )
}

/// Rectangle with its first corner at `start`.
pub fn rectangle(start: Coord<f64>, w: f64, h: f64) -> Shape {
    Shape::polygon(vec![
        start,
        coord! {x: start.x + w, y: start.y},
        coord! {x: start.x + w, y: start.y + h},
        coord! {x: start.x, y: start.y + h},
    ])
}

pub fn rectangle_from_bounds(bounds: Rect<f64>) -> Shape {
    rectangle(bounds.min(), bounds.width(), bounds.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::PointDistance;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(17)
    }

    #[test]
    fn test_rectangle_bounds() {
        let mut rng = rng();
        let r = rectangle(coord! {x: 1.0, y: 2.0}, 3.0, 4.0);
        let b = r.bounding_box(0, &mut rng).unwrap();
        assert_eq!(b.min(), coord! {x: 1.0, y: 2.0});
        assert_eq!(b.max(), coord! {x: 4.0, y: 6.0});
        let grown = add_margin(b, 20.0);
        assert_eq!(grown.min(), coord! {x: -19.0, y: -18.0});
        assert_eq!(grown.width(), 43.0);
    }

    #[test]
    fn test_transforms_are_lazy_and_compose() {
        let mut rng = rng();
        let mut r = rectangle(coord! {x: 0.0, y: 0.0}, 2.0, 1.0);
        r.scale(2.0, 2.0);
        r.translate(10.0, 0.0);
        r.rotate(90.0, coord! {x: 0.0, y: 0.0});
        let b = r.bounding_box(0, &mut rng).unwrap();
        assert!(b.min().distance(&coord! {x: -2.0, y: 10.0}) < 1e-9);
        assert!(b.max().distance(&coord! {x: 0.0, y: 14.0}) < 1e-9);
    }

    #[test]
    fn test_circle_bounds_and_scale() {
        let mut rng = rng();
        let mut c = Shape::circle((1.0, 1.0), 2.0);
        c.scale(-2.0, 2.0);
        let b = c.bounding_box(0, &mut rng).unwrap();
        assert_eq!(b.min(), coord! {x: -6.0, y: -2.0});
        assert_eq!(b.max(), coord! {x: 2.0, y: 6.0});
    }

    #[test]
    fn test_group_prefers_clip() {
        let mut rng = rng();
        let big = rectangle(coord! {x: 0.0, y: 0.0}, 100.0, 100.0);
        let small = rectangle(coord! {x: 10.0, y: 10.0}, 5.0, 5.0);
        let g = Shape::Group(Group::new(vec![big]).with_clip(vec![small]));
        let b = g.bounding_box(0, &mut rng).unwrap();
        assert_eq!(b.width(), 5.0);
        let empty = Shape::Group(Group::default());
        assert_eq!(empty.bounding_box(0, &mut rng), Err(MeanderError::EmptyBounds));
    }

    #[test]
    fn test_rotated_bounding_box() {
        let mut rng = rng();
        let square = rectangle(coord! {x: 0.0, y: 0.0}, 1.0, 1.0);
        let b = rotated_bounding_box(&[square], 45.0, 0, &mut rng).unwrap();
        let half_diag = 2.0f64.sqrt() / 2.0;
        assert!((b.width() - 2.0 * half_diag).abs() < 1e-9);
        assert!((b.height() - 2.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_to_geometry() {
        let mut rng = rng();
        let poly = rectangle(coord! {x: 0.0, y: 0.0}, 1.0, 1.0);
        match poly.to_geometry(0, &mut rng) {
            Geometry::Polygon(p) => {
                assert_eq!(p.exterior().0.len(), 5);
                assert!(p.exterior().is_closed());
            }
            other => panic!("expected a polygon, got {:?}", other),
        }
        let circle = Shape::circle((0.0, 0.0), 10.0);
        match circle.to_geometry(0, &mut rng) {
            Geometry::Polygon(p) => {
                assert_eq!(p.exterior().0.len(), 41);
                for c in &p.exterior().0 {
                    assert!((c.length() - 10.0).abs() < 1e-9);
                }
            }
            other => panic!("expected a polygon, got {:?}", other),
        }
    }
}
