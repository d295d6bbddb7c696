//! Builder for constructing transitions from closures.

use crate::builder::error::BuildError;
use crate::core::{Guard, State, Transition, TransitionHooks};

type Hook = Box<dyn FnMut() + Send>;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder {
    end: State,
    name: Option<String>,
    guard: Option<Guard>,
    on_activated: Option<Hook>,
}

impl TransitionBuilder {
    /// Create a builder for a transition ending at `end`.
    pub fn new(end: &State) -> Self {
        Self {
            end: end.clone(),
            name: None,
            guard: None,
            on_activated: None,
        }
    }

    /// Set an explicit label (optional).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the guard (required).
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Set the guard using a closure (required).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the activation hook (optional).
    pub fn on_activated<F>(mut self, hook: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_activated = Some(Box::new(hook));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition, BuildError> {
        let guard = self.guard.ok_or(BuildError::MissingGuard)?;
        let hooks = ClosureTransition {
            guard,
            on_activated: self.on_activated,
        };

        Ok(match self.name {
            Some(name) => Transition::named(name, &self.end, hooks),
            None => Transition::new(&self.end, hooks),
        })
    }
}

pub(crate) struct ClosureTransition {
    pub(crate) guard: Guard,
    pub(crate) on_activated: Option<Hook>,
}

impl TransitionHooks for ClosureTransition {
    fn should_activate(&self) -> bool {
        self.guard.check()
    }

    fn on_activated(&mut self) {
        if let Some(hook) = self.on_activated.as_mut() {
            hook();
        }
    }
}
