use super::{Step, StepCache};
use rand::{Rng, RngCore};
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

struct PickCell<T> {
    options: Vec<T>,
    frozen: bool,
    cache: StepCache<T>,
}

/// A random pick from a list of anything, stepped frame by frame the same
/// way a [`super::Param`] is. Useful for colours or style names. Static by
/// default; clones alias the same pick.
#[derive(Clone)]
pub struct Pick<T: Clone>(Rc<RefCell<PickCell<T>>>);

impl<T: Clone + Debug> Debug for Pick<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let cell = self.0.borrow();
        f.debug_struct("Pick")
            .field("options", &cell.options)
            .field("static", &cell.frozen)
            .finish()
    }
}

impl<T: Clone> Pick<T> {
    /// Panics on an empty list; there'd be nothing to hand out.
    pub fn new(options: Vec<T>) -> Pick<T> {
        assert!(!options.is_empty(), "Pick needs at least one option");
        Pick(Rc::new(RefCell::new(PickCell {
            options,
            frozen: true,
            cache: StepCache::new(),
        })))
    }

    pub fn animated(self) -> Pick<T> {
        self.0.borrow_mut().frozen = false;
        self
    }

    pub fn state(&self, t: usize, rng: &mut dyn RngCore) -> T {
        let mut cell = self.0.borrow_mut();
        let previous = match cell.cache.step(t, "Pick") {
            Step::Cached(value) => return value,
            Step::Advance(previous) => previous,
        };
        let value = match previous {
            Some(value) if cell.frozen => value,
            _ => cell.options[rng.gen_range(0..cell.options.len())].clone(),
        };
        cell.cache.store(t, value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_is_static_by_default() {
        let mut rng = SmallRng::seed_from_u64(5);
        let colour = Pick::new(vec!["red", "green", "blue"]);
        let first = colour.state(0, &mut rng);
        for t in 0..20 {
            assert_eq!(colour.state(t, &mut rng), first);
        }
    }

    #[test]
    fn test_animated_pick_varies() {
        let mut rng = SmallRng::seed_from_u64(5);
        let colour = Pick::new(vec![1, 2, 3, 4]).animated();
        let seen: Vec<i32> = (0..40).map(|t| colour.state(t, &mut rng)).collect();
        assert!(seen.iter().any(|v| *v != seen[0]));
    }
}
