//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::{ForcedJumpPolicy, MachineConfig};
use crate::core::State;
use crate::driver::StateMachine;

/// Builder for constructing state machines with a fluent API.
///
/// Building registers the states in order and sets the entry state, so the
/// same errors as the direct calls can surface from [`build`](Self::build).
#[derive(Default)]
pub struct StateMachineBuilder {
    config: MachineConfig,
    states: Vec<State>,
    entry: Option<State>,
}

impl StateMachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn forced_jump(mut self, policy: ForcedJumpPolicy) -> Self {
        self.config.forced_jump = policy;
        self
    }

    /// Add a state.
    pub fn state(mut self, state: &State) -> Self {
        self.states.push(state.clone());
        self
    }

    /// Add multiple states at once.
    pub fn states<'a, I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = &'a State>,
    {
        self.states.extend(states.into_iter().cloned());
        self
    }

    /// Set the entry state (optional; can also be set on the machine later).
    pub fn entry(mut self, state: &State) -> Self {
        self.entry = Some(state.clone());
        self
    }

    /// Build the state machine.
    pub fn build(self) -> Result<StateMachine, BuildError> {
        self.config.validate()?;

        let mut machine = StateMachine::with_config(self.config);
        machine.add_states(&self.states)?;
        if let Some(entry) = &self.entry {
            machine.set_entry_state(entry)?;
        }

        Ok(machine)
    }
}
