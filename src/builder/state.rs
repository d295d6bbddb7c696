//! Builder for states whose hooks are closures.

use crate::core::{State, StateHooks};

type Hook = Box<dyn FnMut() + Send>;

/// Builder for constructing states from closures instead of a hand-written
/// [`StateHooks`] implementation. Hooks that are not supplied do nothing.
///
/// # Example
///
/// ```rust
/// use stateful::builder::StateBuilder;
///
/// let closed = StateBuilder::named("Closed")
///     .on_enter(|| println!("door is closed"))
///     .on_exit(|| println!("door is beginning to open"))
///     .build();
///
/// assert_eq!(closed.label(), "Closed");
/// ```
#[derive(Default)]
pub struct StateBuilder {
    name: Option<String>,
    on_enter: Option<Hook>,
    while_in: Option<Hook>,
    on_exit: Option<Hook>,
}

impl StateBuilder {
    /// Create a builder for an unnamed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for a state with an explicit label.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_enter = Some(Box::new(hook));
        self
    }

    pub fn while_in<F>(mut self, hook: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.while_in = Some(Box::new(hook));
        self
    }

    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_exit = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> State {
        let hooks = ClosureState {
            on_enter: self.on_enter,
            while_in: self.while_in,
            on_exit: self.on_exit,
        };
        match self.name {
            Some(name) => State::named(name, hooks),
            None => State::new(hooks),
        }
    }
}

struct ClosureState {
    on_enter: Option<Hook>,
    while_in: Option<Hook>,
    on_exit: Option<Hook>,
}

impl StateHooks for ClosureState {
    fn on_enter_state(&mut self) {
        if let Some(hook) = self.on_enter.as_mut() {
            hook();
        }
    }

    fn while_in_state(&mut self) {
        if let Some(hook) = self.while_in.as_mut() {
            hook();
        }
    }

    fn on_exit_state(&mut self) {
        if let Some(hook) = self.on_exit.as_mut() {
            hook();
        }
    }
}
