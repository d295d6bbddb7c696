//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders for wiring a machine out of closures
//! instead of hand-written hook types.

pub mod error;
pub mod machine;
pub mod state;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Guard, State, Transition};
use transition::ClosureTransition;

/// Create a state whose hooks do nothing.
///
/// # Example
///
/// ```
/// use stateful::builder::passive_state;
///
/// let idle = passive_state("Idle");
/// assert_eq!(idle.label(), "Idle");
/// ```
pub fn passive_state(name: impl Into<String>) -> State {
    StateBuilder::named(name).build()
}

/// Create a transition to `end` that fires whenever `guard` holds.
///
/// # Example
///
/// ```
/// use stateful::builder::{guarded_transition, passive_state};
///
/// let idle = passive_state("Idle");
/// let busy = passive_state("Busy");
/// let start = guarded_transition(&busy, || true);
///
/// idle.add_transition(&start).unwrap();
/// assert_eq!(start.start(), Some(idle.id()));
/// ```
pub fn guarded_transition<F>(end: &State, guard: F) -> Transition
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    Transition::new(
        end,
        ClosureTransition {
            guard: Guard::new(guard),
            on_activated: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passive_state_builds() {
        let state = passive_state("Idle");
        assert_eq!(state.label(), "Idle");
        assert_eq!(state.transition_count(), 0);
    }

    #[test]
    fn guarded_transition_respects_guard() {
        let end = passive_state("End");

        assert!(guarded_transition(&end, || true).should_activate());
        assert!(!guarded_transition(&end, || false).should_activate());
    }
}
