//! Guard predicates for controlling when transitions fire.
//!
//! Guards are boolean functions polled once per tick. They usually read some
//! outside condition (a clock, a sensor, a flag) captured by the closure.

use std::fmt;

/// Predicate that determines if a transition fires on the current tick.
///
/// # Example
///
/// ```rust
/// use stateful::core::Guard;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let button = Arc::new(AtomicBool::new(false));
/// let pressed = {
///     let button = Arc::clone(&button);
///     Guard::new(move || button.load(Ordering::SeqCst))
/// };
///
/// assert!(!pressed.check());
/// button.store(true, Ordering::SeqCst);
/// assert!(pressed.check());
/// ```
pub struct Guard {
    predicate: Box<dyn Fn() -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that is always satisfied.
    pub fn always() -> Self {
        Self::new(|| true)
    }

    /// Guard that is never satisfied.
    pub fn never() -> Self {
        Self::new(|| false)
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn always_and_never() {
        assert!(Guard::always().check());
        assert!(!Guard::never().check());
    }

    #[test]
    fn guard_reads_captured_state() {
        let level = Arc::new(AtomicUsize::new(0));
        let guard = {
            let level = Arc::clone(&level);
            Guard::new(move || level.load(Ordering::SeqCst) > 2)
        };

        assert!(!guard.check());
        level.store(3, Ordering::SeqCst);
        assert!(guard.check());
    }

    #[test]
    fn guard_is_deterministic_for_fixed_input() {
        let guard = Guard::new(|| 7 % 2 == 1);

        let result1 = guard.check();
        let result2 = guard.check();

        assert_eq!(result1, result2);
    }
}
