//! # Param
//!
//! Numbers that don't have to be numbers yet. A [`Param`] is a node in a small
//! expression graph: a fixed value, a random draw, arithmetic on other nodes,
//! or a random walk. Asking a node for its value at frame `t` with
//! [`Param::state`] computes it at most once per frame, so a node that is
//! referenced from several places sees a single consistent value each frame.
//!
//! Frames must be visited in order: `state(0)`, then `state(0)` or `state(1)`,
//! then `state(1)` or `state(2)`, and so on. Skipping or going back is a bug in
//! the caller and panics.
//!
//! ```rust
//! use meander::param::Param;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
//! // a wobble that wanders between 0 and 10, one small step per frame
//! let wobble = Param::dynamic(5.0)
//!     .delta(Param::uniform(-0.5, 0.5).animated())
//!     .min(0.0)
//!     .max(10.0)
//!     .build();
//! let radius = &wobble * 2.0 + 1.0;
//! for t in 0..100 {
//!     let r = radius.state(t, &mut rng);
//!     assert!((1.0..=21.0).contains(&r));
//! }
//! ```
use rand::{Rng, RngCore};
use rand_distr::{Exp1, StandardNormal};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

mod ops;
pub mod pick;
pub use pick::Pick;

/// Per-frame memo shared by every lazily stepped node type.
#[derive(Clone, Debug)]
pub(crate) struct StepCache<T> {
    last: Option<(usize, T)>,
}

/// What a node has to do to answer a request for frame `t`.
pub(crate) enum Step<T> {
    /// Same frame as last time.
    Cached(T),
    /// One frame past the last one (or frame 0 on first use).
    Advance(Option<T>),
}

impl<T: Clone> StepCache<T> {
    pub(crate) fn new() -> Self {
        StepCache { last: None }
    }

    /// Panics unless `t` repeats the last frame or is the one right after it.
    pub(crate) fn step(&self, t: usize, what: &str) -> Step<T> {
        match &self.last {
            None => {
                assert!(
                    t == 0,
                    "{} evaluated first at frame {}; frames must start at 0",
                    what,
                    t
                );
                Step::Advance(None)
            }
            Some((last_t, value)) if *last_t == t => Step::Cached(value.clone()),
            Some((last_t, value)) => {
                assert!(
                    t == last_t + 1,
                    "{} asked for frame {} after frame {}; frames must advance one at a time",
                    what,
                    t,
                    last_t
                );
                Step::Advance(Some(value.clone()))
            }
        }
    }

    pub(crate) fn store(&mut self, t: usize, value: T) {
        self.last = Some((t, value));
    }

    pub(crate) fn last_frame(&self) -> Option<usize> {
        self.last.as_ref().map(|(t, _)| *t)
    }
}

/// A value generator for [`Param::function`].
pub type ParamFn = Rc<dyn Fn(&mut dyn RngCore) -> f64>;

/// A transfer function for [`Param::map`].
pub type MapFn = Rc<dyn Fn(f64) -> f64>;

/// Copies already made during one fork, keyed by the original node.
pub(crate) type ForkMemo = HashMap<*const RefCell<ParamCell>, Param>;

pub(crate) enum ParamNode {
    Fixed(f64),
    Choice(Vec<f64>),
    Function(ParamFn),
    Uniform { min: f64, max: f64 },
    Normal { mean: f64, stdev: f64 },
    Exponential { mean: f64, stdev: f64 },
    Sum(Vec<Param>),
    Difference(Vec<Param>),
    Product(Vec<Param>),
    Quotient(Vec<Param>),
    Clip {
        inner: Param,
        min: Option<Param>,
        max: Option<Param>,
    },
    Map {
        inner: Param,
        f: MapFn,
    },
    Dynamic {
        start: Param,
        delta: Option<Param>,
        ratio: Option<Param>,
        min: Option<Param>,
        max: Option<Param>,
    },
}

pub(crate) struct ParamCell {
    node: ParamNode,
    frozen: bool,
    cache: StepCache<f64>,
}

/// Handle to a node in the parameter graph. Cloning the handle aliases the
/// node (both clones see the same value every frame); use [`Param::fork`] for
/// an independent copy.
#[derive(Clone)]
pub struct Param(Rc<RefCell<ParamCell>>);

impl Debug for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let cell = self.0.borrow();
        f.debug_struct("Param")
            .field("kind", &cell.node.kind())
            .field("static", &cell.frozen)
            .field("last", &cell.cache.last)
            .finish()
    }
}

impl ParamNode {
    fn kind(&self) -> &'static str {
        match self {
            ParamNode::Fixed(_) => "Fixed",
            ParamNode::Choice(_) => "Choice",
            ParamNode::Function(_) => "Function",
            ParamNode::Uniform { .. } => "Uniform",
            ParamNode::Normal { .. } => "Normal",
            ParamNode::Exponential { .. } => "Exponential",
            ParamNode::Sum(_) => "Sum",
            ParamNode::Difference(_) => "Difference",
            ParamNode::Product(_) => "Product",
            ParamNode::Quotient(_) => "Quotient",
            ParamNode::Clip { .. } => "Clip",
            ParamNode::Map { .. } => "Map",
            ParamNode::Dynamic { .. } => "Dynamic",
        }
    }
}

fn clamp(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let value = match min {
        Some(min) => value.max(min),
        None => value,
    };
    match max {
        Some(max) => value.min(max),
        None => value,
    }
}

fn fold(operands: &[Param], t: usize, rng: &mut dyn RngCore, op: fn(f64, f64) -> f64) -> f64 {
    let mut values = operands.iter().map(|p| p.state(t, rng)).collect::<Vec<f64>>().into_iter();
    match values.next() {
        Some(first) => values.fold(first, op),
        None => 0.0,
    }
}

impl Param {
    fn from_node(node: ParamNode, frozen: bool) -> Param {
        Param(Rc::new(RefCell::new(ParamCell {
            node,
            frozen,
            cache: StepCache::new(),
        })))
    }

    pub fn fixed(value: f64) -> Param {
        Param::from_node(ParamNode::Fixed(value), true)
    }

    /// Picks one of `values` with equal odds. Static by default, so only the
    /// first draw counts unless [`Param::animated`] is used.
    pub fn choice(values: Vec<f64>) -> Param {
        Param::from_node(ParamNode::Choice(values), true)
    }

    /// Calls `f` for each new value. Static by default.
    pub fn function<F>(f: F) -> Param
    where
        F: Fn(&mut dyn RngCore) -> f64 + 'static,
    {
        Param::from_node(ParamNode::Function(Rc::new(f)), true)
    }

    /// Uniform over `[min, max]`; swapped bounds are put back in order and
    /// `min == max` always yields that value. Static by default.
    pub fn uniform(min: f64, max: f64) -> Param {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Param::from_node(ParamNode::Uniform { min, max }, true)
    }

    /// Gaussian with the given mean and standard deviation. Static by default.
    pub fn normal(mean: f64, stdev: f64) -> Param {
        Param::from_node(ParamNode::Normal { mean, stdev: stdev.abs() }, true)
    }

    /// `(mean - stdev) + Exp(scale = stdev)`, a skewed spread with a hard
    /// floor at `mean - stdev` whose mean is `mean`. Static by default.
    pub fn exponential(mean: f64, stdev: f64) -> Param {
        Param::from_node(
            ParamNode::Exponential {
                mean,
                stdev: stdev.abs(),
            },
            true,
        )
    }

    pub fn sum(operands: Vec<Param>) -> Param {
        Param::from_node(ParamNode::Sum(operands), false)
    }

    /// First operand minus the rest.
    pub fn difference(operands: Vec<Param>) -> Param {
        Param::from_node(ParamNode::Difference(operands), false)
    }

    pub fn product(operands: Vec<Param>) -> Param {
        Param::from_node(ParamNode::Product(operands), false)
    }

    /// First operand divided by the rest.
    pub fn quotient(operands: Vec<Param>) -> Param {
        Param::from_node(ParamNode::Quotient(operands), false)
    }

    /// `inner` clamped to `[min, max]`, either bound optional.
    pub fn clip(inner: impl Into<Param>, min: Option<Param>, max: Option<Param>) -> Param {
        Param::from_node(
            ParamNode::Clip {
                inner: inner.into(),
                min,
                max,
            },
            false,
        )
    }

    /// `f` applied to this node's value each frame.
    pub fn map<F>(&self, f: F) -> Param
    where
        F: Fn(f64) -> f64 + 'static,
    {
        Param::from_node(
            ParamNode::Map {
                inner: self.clone(),
                f: Rc::new(f),
            },
            false,
        )
    }

    /// Start building a random walk seeded by `start`.
    pub fn dynamic(start: impl Into<Param>) -> DynamicBuilder {
        DynamicBuilder {
            start: start.into(),
            delta: None,
            ratio: None,
            min: None,
            max: None,
        }
    }

    /// Recompute every frame instead of freezing after frame 0.
    pub fn animated(self) -> Param {
        self.0.borrow_mut().frozen = false;
        self
    }

    /// Freeze after the first evaluation, whatever kind of node this is.
    pub fn frozen(self) -> Param {
        self.0.borrow_mut().frozen = true;
        self
    }

    pub fn is_static(&self) -> bool {
        self.0.borrow().frozen
    }

    /// Last frame this node was evaluated at, if any.
    pub fn last_frame(&self) -> Option<usize> {
        self.0.borrow().cache.last_frame()
    }

    /// The expected value where it's known without sampling.
    pub fn mean(&self) -> Option<f64> {
        match &self.0.borrow().node {
            ParamNode::Fixed(v) => Some(*v),
            ParamNode::Choice(values) if !values.is_empty() => {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            }
            ParamNode::Uniform { min, max } => Some((min + max) / 2.0),
            ParamNode::Normal { mean, .. } | ParamNode::Exponential { mean, .. } => Some(*mean),
            _ => None,
        }
    }

    /// Two handles to the very same node?
    pub fn ptr_eq(&self, other: &Param) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Value at frame `t`.
    ///
    /// Panics if `t` is neither the last evaluated frame nor the one right
    /// after it (frame 0 for a fresh node).
    pub fn state(&self, t: usize, rng: &mut dyn RngCore) -> f64 {
        let mut cell = self.0.borrow_mut();
        let previous = match cell.cache.step(t, cell.node.kind()) {
            Step::Cached(value) => return value,
            Step::Advance(previous) => previous,
        };
        let value = match previous {
            Some(value) if cell.frozen => value,
            _ => cell.node.compute(t, previous, rng),
        };
        cell.cache.store(t, value);
        value
    }

    /// Independent deep copy. Nodes shared inside this graph stay shared
    /// inside the copy, but nothing is shared with the original. The copy
    /// starts fresh at frame 0.
    pub fn fork(&self) -> Param {
        self.fork_with(&mut HashMap::new())
    }

    /// [`Param::fork`] sharing `seen` with other forks, so nodes reached
    /// from several roots are copied once.
    pub(crate) fn fork_with(&self, seen: &mut ForkMemo) -> Param {
        let key = Rc::as_ptr(&self.0);
        if let Some(copy) = seen.get(&key) {
            return copy.clone();
        }
        let cell = self.0.borrow();
        let fork_all = |ops: &Vec<Param>, seen: &mut ForkMemo| -> Vec<Param> {
            ops.iter().map(|p| p.fork_with(seen)).collect()
        };
        let node = match &cell.node {
            ParamNode::Fixed(v) => ParamNode::Fixed(*v),
            ParamNode::Choice(values) => ParamNode::Choice(values.clone()),
            ParamNode::Function(f) => ParamNode::Function(f.clone()),
            ParamNode::Uniform { min, max } => ParamNode::Uniform {
                min: *min,
                max: *max,
            },
            ParamNode::Normal { mean, stdev } => ParamNode::Normal {
                mean: *mean,
                stdev: *stdev,
            },
            ParamNode::Exponential { mean, stdev } => ParamNode::Exponential {
                mean: *mean,
                stdev: *stdev,
            },
            ParamNode::Sum(ops) => ParamNode::Sum(fork_all(ops, seen)),
            ParamNode::Difference(ops) => ParamNode::Difference(fork_all(ops, seen)),
            ParamNode::Product(ops) => ParamNode::Product(fork_all(ops, seen)),
            ParamNode::Quotient(ops) => ParamNode::Quotient(fork_all(ops, seen)),
            ParamNode::Clip { inner, min, max } => ParamNode::Clip {
                inner: inner.fork_with(seen),
                min: min.as_ref().map(|p| p.fork_with(seen)),
                max: max.as_ref().map(|p| p.fork_with(seen)),
            },
            ParamNode::Map { inner, f } => ParamNode::Map {
                inner: inner.fork_with(seen),
                f: f.clone(),
            },
            ParamNode::Dynamic {
                start,
                delta,
                ratio,
                min,
                max,
            } => ParamNode::Dynamic {
                start: start.fork_with(seen),
                delta: delta.as_ref().map(|p| p.fork_with(seen)),
                ratio: ratio.as_ref().map(|p| p.fork_with(seen)),
                min: min.as_ref().map(|p| p.fork_with(seen)),
                max: max.as_ref().map(|p| p.fork_with(seen)),
            },
        };
        let copy = Param::from_node(node, cell.frozen);
        seen.insert(key, copy.clone());
        copy
    }
}

fn state_of(param: &Option<Param>, t: usize, rng: &mut dyn RngCore) -> Option<f64> {
    param.as_ref().map(|p| p.state(t, rng))
}

impl ParamNode {
    /// A fresh value for frame `t`; `previous` is this node's value at `t - 1`.
    fn compute(&self, t: usize, previous: Option<f64>, rng: &mut dyn RngCore) -> f64 {
        match self {
            ParamNode::Fixed(v) => *v,
            ParamNode::Choice(values) => {
                assert!(!values.is_empty(), "Choice param has nothing to choose from");
                values[rng.gen_range(0..values.len())]
            }
            ParamNode::Function(f) => f(rng),
            ParamNode::Uniform { min, max } => {
                if min == max {
                    *min
                } else {
                    rng.gen_range(*min..=*max)
                }
            }
            ParamNode::Normal { mean, stdev } => {
                let z: f64 = rng.sample(StandardNormal);
                mean + stdev * z
            }
            ParamNode::Exponential { mean, stdev } => {
                let e: f64 = rng.sample(Exp1);
                (mean - stdev) + stdev * e
            }
            ParamNode::Sum(ops) => fold(ops, t, rng, |a, b| a + b),
            ParamNode::Difference(ops) => fold(ops, t, rng, |a, b| a - b),
            ParamNode::Product(ops) => fold(ops, t, rng, |a, b| a * b),
            ParamNode::Quotient(ops) => fold(ops, t, rng, |a, b| a / b),
            ParamNode::Clip { inner, min, max } => {
                let value = inner.state(t, rng);
                clamp(value, state_of(min, t, rng), state_of(max, t, rng))
            }
            ParamNode::Map { inner, f } => f(inner.state(t, rng)),
            ParamNode::Dynamic {
                start,
                delta,
                ratio,
                min,
                max,
            } => {
                // every child is stepped every frame so their clocks stay in line
                let start = start.state(t, rng);
                let delta = state_of(delta, t, rng);
                let ratio = state_of(ratio, t, rng);
                let min = state_of(min, t, rng);
                let max = state_of(max, t, rng);
                let value = match previous {
                    None => start,
                    Some(mut value) => {
                        if let Some(delta) = delta {
                            value += delta;
                        }
                        if let Some(ratio) = ratio {
                            value *= ratio;
                        }
                        value
                    }
                };
                clamp(value, min, max)
            }
        }
    }
}

/// Builder for [`Param::dynamic`] random walks.
///
/// Each frame after the first adds `delta`, then multiplies by `ratio`, then
/// clamps into `[min, max]`. The start value is clamped too.
pub struct DynamicBuilder {
    start: Param,
    delta: Option<Param>,
    ratio: Option<Param>,
    min: Option<Param>,
    max: Option<Param>,
}

impl DynamicBuilder {
    pub fn delta(mut self, delta: impl Into<Param>) -> Self {
        self.delta = Some(delta.into());
        self
    }

    pub fn ratio(mut self, ratio: impl Into<Param>) -> Self {
        self.ratio = Some(ratio.into());
        self
    }

    pub fn min(mut self, min: impl Into<Param>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn max(mut self, max: impl Into<Param>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn build(self) -> Param {
        Param::from_node(
            ParamNode::Dynamic {
                start: self.start,
                delta: self.delta,
                ratio: self.ratio,
                min: self.min,
                max: self.max,
            },
            false,
        )
    }
}

impl From<DynamicBuilder> for Param {
    fn from(builder: DynamicBuilder) -> Self {
        builder.build()
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::fixed(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::fixed(f64::from(value))
    }
}

impl From<&Param> for Param {
    fn from(value: &Param) -> Self {
        value.clone()
    }
}

impl From<Vec<f64>> for Param {
    fn from(values: Vec<f64>) -> Self {
        Param::choice(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn test_same_frame_is_cached() {
        let mut rng = rng();
        let p = Param::uniform(0.0, 1.0).animated();
        for t in 0..20 {
            let a = p.state(t, &mut rng);
            let b = p.state(t, &mut rng);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_animated_changes_between_frames() {
        let mut rng = rng();
        let p = Param::uniform(0.0, 1.0).animated();
        let values: Vec<f64> = (0..10).map(|t| p.state(t, &mut rng)).collect();
        assert!(values.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_static_freezes() {
        let mut rng = rng();
        for p in vec![
            Param::uniform(0.0, 100.0),
            Param::normal(0.0, 5.0),
            Param::exponential(10.0, 3.0),
            Param::choice(vec![1.0, 2.0, 3.0, 4.0]),
            Param::function(|rng| rng.gen::<f64>()),
            Param::dynamic(1.0).delta(1.0).build().frozen(),
        ] {
            assert!(p.is_static());
            let first = p.state(0, &mut rng);
            for t in 1..50 {
                assert_eq!(p.state(t, &mut rng), first);
            }
        }
    }

    #[test]
    #[should_panic(expected = "frames must advance one at a time")]
    fn test_skipping_a_frame_panics() {
        let mut rng = rng();
        let p = Param::uniform(0.0, 1.0);
        p.state(0, &mut rng);
        p.state(2, &mut rng);
    }

    #[test]
    #[should_panic(expected = "frames must start at 0")]
    fn test_first_frame_must_be_zero() {
        let mut rng = rng();
        Param::fixed(1.0).state(3, &mut rng);
    }

    #[test]
    #[should_panic(expected = "frames must advance one at a time")]
    fn test_going_back_panics() {
        let mut rng = rng();
        let p = Param::fixed(1.0);
        p.state(0, &mut rng);
        p.state(1, &mut rng);
        p.state(0, &mut rng);
    }

    #[test]
    fn test_degenerate_uniform() {
        let mut rng = rng();
        let p = Param::uniform(5.0, 5.0).animated();
        for t in 0..100 {
            assert_eq!(p.state(t, &mut rng), 5.0);
        }
    }

    #[test]
    fn test_uniform_bounds_and_swapped() {
        let mut rng = rng();
        let p = Param::uniform(3.0, -2.0).animated();
        for t in 0..500 {
            let v = p.state(t, &mut rng);
            assert!((-2.0..=3.0).contains(&v));
        }
        assert_eq!(p.mean(), Some(0.5));
    }

    #[test]
    fn test_flat_dynamic_holds() {
        let mut rng = rng();
        let p = Param::dynamic(10.0).delta(0.0).min(0.0).max(100.0).build();
        for t in 0..100 {
            assert_eq!(p.state(t, &mut rng), 10.0);
        }
    }

    #[test]
    fn test_dynamic_walk_stays_in_bounds() {
        let mut rng = rng();
        let p = Param::dynamic(Param::uniform(2.0, 4.0))
            .delta(Param::uniform(-1.0, 1.0).animated())
            .min(2.0)
            .max(4.0)
            .build();
        let mut moved = false;
        let first = p.state(0, &mut rng);
        for t in 0..1000 {
            let v = p.state(t, &mut rng);
            assert!((2.0..=4.0).contains(&v));
            moved |= v != first;
        }
        assert!(moved);
    }

    #[test]
    fn test_dynamic_clamps_start() {
        let mut rng = rng();
        let p = Param::dynamic(50.0).delta(1.0).max(10.0).build();
        assert_eq!(p.state(0, &mut rng), 10.0);
    }

    #[test]
    fn test_delta_then_ratio() {
        let mut rng = rng();
        let p = Param::dynamic(1.0).delta(1.0).ratio(2.0).build();
        let values: Vec<f64> = (0..4).map(|t| p.state(t, &mut rng)).collect();
        // (1 + 1) * 2 = 4, (4 + 1) * 2 = 10, (10 + 1) * 2 = 22
        assert_eq!(values, vec![1.0, 4.0, 10.0, 22.0]);
    }

    #[test]
    fn test_second_order_walk() {
        let mut rng = rng();
        let velocity = Param::dynamic(0.0)
            .delta(Param::uniform(-0.1, 0.1).animated())
            .min(-1.0)
            .max(1.0)
            .build();
        let position = Param::dynamic(0.0).delta(&velocity).build();
        let mut last = position.state(0, &mut rng);
        velocity.state(0, &mut rng);
        for t in 1..200 {
            let p = position.state(t, &mut rng);
            let v = velocity.state(t, &mut rng);
            assert!((p - (last + v)).abs() < 1e-12);
            last = p;
        }
    }

    #[test]
    fn test_aliased_operand_evaluates_once_per_frame() {
        let mut rng = rng();
        let x = Param::uniform(0.0, 1.0).animated();
        let doubled = &x + &x;
        let diff = &x - &x;
        for t in 0..20 {
            let v = x.state(t, &mut rng);
            assert_eq!(doubled.state(t, &mut rng), 2.0 * v);
            assert_eq!(diff.state(t, &mut rng), 0.0);
        }
    }

    #[test]
    fn test_clip() {
        let mut rng = rng();
        let p = Param::clip(Param::uniform(-10.0, 10.0).animated(), Some(Param::fixed(-1.0)), Some(Param::fixed(1.0)));
        for t in 0..200 {
            let v = p.state(t, &mut rng);
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_map_follows_inner() {
        let mut rng = rng();
        let x = Param::uniform(0.0, 10.0).animated();
        let squared = x.map(|v| v * v);
        for t in 0..20 {
            let v = x.state(t, &mut rng);
            assert_eq!(squared.state(t, &mut rng), v * v);
        }
        let copy = squared.fork();
        let v = copy.state(0, &mut rng);
        assert!((0.0..=100.0).contains(&v));
    }

    #[test]
    fn test_choice_only_picks_listed_values() {
        let mut rng = rng();
        let p = Param::choice(vec![100.0, 300.0]).animated();
        let mut seen = (false, false);
        for t in 0..100 {
            match p.state(t, &mut rng) {
                v if v == 100.0 => seen.0 = true,
                v if v == 300.0 => seen.1 = true,
                v => panic!("unexpected choice {}", v),
            }
        }
        assert_eq!(seen, (true, true));
    }

    #[test]
    fn test_exponential_floor() {
        let mut rng = rng();
        let p = Param::exponential(50.0, 20.0).animated();
        for t in 0..500 {
            assert!(p.state(t, &mut rng) >= 30.0);
        }
    }

    #[test]
    fn test_fork_is_independent_but_keeps_inner_aliasing() {
        let mut rng = rng();
        let x = Param::uniform(0.0, 1.0).animated();
        let sum = &x + &x;
        let copy = sum.fork();
        assert!(!copy.ptr_eq(&sum));
        for t in 0..10 {
            let a = sum.state(t, &mut rng);
            let b = copy.state(t, &mut rng);
            assert_eq!(a, 2.0 * x.state(t, &mut rng));
            assert!(b >= 0.0 && b <= 2.0);
        }
        // the fork starts its own clock
        let late = sum.fork();
        assert_eq!(late.last_frame(), None);
        late.state(0, &mut rng);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let build = || {
            Param::dynamic(0.0)
                .delta(Param::normal(0.0, 1.0).animated())
                .build()
        };
        let run = |p: Param| {
            let mut rng = SmallRng::seed_from_u64(9);
            (0..30).map(|t| p.state(t, &mut rng)).collect::<Vec<f64>>()
        };
        assert_eq!(run(build()), run(build()));
    }
}
