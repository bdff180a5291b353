//! Dynamic 2D points.
//!
//! A [`Point`] is to a location what a [`Param`] is to a number: something
//! evaluated lazily, once per frame, possibly built out of other points and
//! params. Points share the frame rules of params (start at 0, repeat or
//! advance by one) and clones alias the same node.
use crate::geom::{endpoint, rad, rotated_point, scaled_point};
use crate::param::{ForkMemo, Param, Step, StepCache};
use geo_types::{coord, Coord};
use rand::RngCore;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::ops::Add;
use std::rc::Rc;

pub(crate) enum PointNode {
    Fixed(Coord<f64>),
    Params {
        x: Param,
        y: Param,
    },
    /// `distance` away from `reference` in `direction` degrees.
    Move {
        reference: Point,
        direction: Param,
        distance: Param,
    },
    Translation {
        start: Point,
        offset: Point,
    },
    /// `start` rotated about `pivot` by `angle` radians.
    Rotation {
        start: Point,
        pivot: Point,
        angle: Param,
    },
    /// `start` scaled about the origin.
    Scaling {
        start: Point,
        cx: Param,
        cy: Param,
    },
}

impl PointNode {
    fn kind(&self) -> &'static str {
        match self {
            PointNode::Fixed(_) => "Point",
            PointNode::Params { .. } => "Point",
            PointNode::Move { .. } => "Move",
            PointNode::Translation { .. } => "Translation",
            PointNode::Rotation { .. } => "Rotation",
            PointNode::Scaling { .. } => "Scaling",
        }
    }
}

pub(crate) struct PointCell {
    node: PointNode,
    cache: StepCache<Coord<f64>>,
}

#[derive(Clone)]
pub struct Point(Rc<RefCell<PointCell>>);

impl Debug for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let cell = self.0.borrow();
        f.debug_struct("Point")
            .field("kind", &cell.node.kind())
            .field("last", &cell.cache.last_frame())
            .finish()
    }
}

impl Point {
    fn from_node(node: PointNode) -> Point {
        Point(Rc::new(RefCell::new(PointCell {
            node,
            cache: StepCache::new(),
        })))
    }

    pub fn fixed(x: f64, y: f64) -> Point {
        Point::from_node(PointNode::Fixed(coord! {x: x, y: y}))
    }

    /// A point whose coordinates are params.
    pub fn new(x: impl Into<Param>, y: impl Into<Param>) -> Point {
        Point::from_node(PointNode::Params {
            x: x.into(),
            y: y.into(),
        })
    }

    /// Offset from `reference` by `distance` in a uniformly random direction.
    pub fn random_move(reference: impl Into<Point>, distance: impl Into<Param>) -> Point {
        Point::moved(reference, Param::uniform(0.0, 360.0), distance)
    }

    /// Offset from `reference` by `distance` in `direction` (degrees).
    pub fn moved(
        reference: impl Into<Point>,
        direction: impl Into<Param>,
        distance: impl Into<Param>,
    ) -> Point {
        Point::from_node(PointNode::Move {
            reference: reference.into(),
            direction: direction.into(),
            distance: distance.into(),
        })
    }

    pub fn translation(start: impl Into<Point>, offset: impl Into<Point>) -> Point {
        Point::from_node(PointNode::Translation {
            start: start.into(),
            offset: offset.into(),
        })
    }

    /// `angle` is in radians.
    pub fn rotation(start: impl Into<Point>, pivot: impl Into<Point>, angle: impl Into<Param>) -> Point {
        Point::from_node(PointNode::Rotation {
            start: start.into(),
            pivot: pivot.into(),
            angle: angle.into(),
        })
    }

    /// Scale about the origin. Use the same param twice for uniform scaling.
    pub fn scaling(start: impl Into<Point>, cx: impl Into<Param>, cy: impl Into<Param>) -> Point {
        Point::from_node(PointNode::Scaling {
            start: start.into(),
            cx: cx.into(),
            cy: cy.into(),
        })
    }

    pub fn ptr_eq(&self, other: &Point) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Location at frame `t`. Same frame rules as [`Param::state`].
    pub fn state(&self, t: usize, rng: &mut dyn RngCore) -> Coord<f64> {
        let mut cell = self.0.borrow_mut();
        if let Step::Cached(value) = cell.cache.step(t, cell.node.kind()) {
            return value;
        }
        let value = cell.node.compute(t, rng);
        cell.cache.store(t, value);
        value
    }

    /// Independent deep copy; params inside are forked too. Shared nodes
    /// inside the graph, points or params, stay shared inside the copy.
    pub fn fork(&self) -> Point {
        self.fork_with(&mut HashMap::new(), &mut ForkMemo::new())
    }

    fn fork_with(
        &self,
        seen: &mut HashMap<*const RefCell<PointCell>, Point>,
        params: &mut ForkMemo,
    ) -> Point {
        let key = Rc::as_ptr(&self.0);
        if let Some(copy) = seen.get(&key) {
            return copy.clone();
        }
        let cell = self.0.borrow();
        let node = match &cell.node {
            PointNode::Fixed(c) => PointNode::Fixed(*c),
            PointNode::Params { x, y } => PointNode::Params {
                x: x.fork_with(params),
                y: y.fork_with(params),
            },
            PointNode::Move {
                reference,
                direction,
                distance,
            } => PointNode::Move {
                reference: reference.fork_with(seen, params),
                direction: direction.fork_with(params),
                distance: distance.fork_with(params),
            },
            PointNode::Translation { start, offset } => PointNode::Translation {
                start: start.fork_with(seen, params),
                offset: offset.fork_with(seen, params),
            },
            PointNode::Rotation { start, pivot, angle } => PointNode::Rotation {
                start: start.fork_with(seen, params),
                pivot: pivot.fork_with(seen, params),
                angle: angle.fork_with(params),
            },
            PointNode::Scaling { start, cx, cy } => PointNode::Scaling {
                start: start.fork_with(seen, params),
                cx: cx.fork_with(params),
                cy: cy.fork_with(params),
            },
        };
        let copy = Point::from_node(node);
        seen.insert(key, copy.clone());
        copy
    }
}

impl PointNode {
    fn compute(&self, t: usize, rng: &mut dyn RngCore) -> Coord<f64> {
        match self {
            PointNode::Fixed(c) => *c,
            PointNode::Params { x, y } => coord! {x: x.state(t, rng), y: y.state(t, rng)},
            PointNode::Move {
                reference,
                direction,
                distance,
            } => {
                let origin = reference.state(t, rng);
                let direction = direction.state(t, rng);
                let distance = distance.state(t, rng);
                endpoint(origin, rad(direction), distance)
            }
            PointNode::Translation { start, offset } => {
                start.state(t, rng) + offset.state(t, rng)
            }
            PointNode::Rotation { start, pivot, angle } => {
                let start = start.state(t, rng);
                let pivot = pivot.state(t, rng);
                rotated_point(start, pivot, angle.state(t, rng))
            }
            PointNode::Scaling { start, cx, cy } => {
                let start = start.state(t, rng);
                let cx = cx.state(t, rng);
                let cy = cy.state(t, rng);
                scaled_point(start, cx, cy)
            }
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from(xy: (f64, f64)) -> Self {
        Point::fixed(xy.0, xy.1)
    }
}

impl From<Coord<f64>> for Point {
    fn from(c: Coord<f64>) -> Self {
        Point::fixed(c.x, c.y)
    }
}

impl From<(Param, Param)> for Point {
    fn from(xy: (Param, Param)) -> Self {
        Point::new(xy.0, xy.1)
    }
}

impl From<&Point> for Point {
    fn from(p: &Point) -> Self {
        p.clone()
    }
}

impl Add<Point> for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::translation(self, rhs)
    }
}

impl Add<&Point> for &Point {
    type Output = Point;
    fn add(self, rhs: &Point) -> Point {
        Point::translation(self.clone(), rhs.clone())
    }
}

impl Add<(f64, f64)> for Point {
    type Output = Point;
    fn add(self, rhs: (f64, f64)) -> Point {
        Point::translation(self, rhs)
    }
}
