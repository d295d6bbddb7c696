//! Errors raised while wiring or driving a state machine.

use thiserror::Error;

/// Errors that can occur when registering states and transitions or when
/// ticking the machine.
///
/// All of these are caller mistakes. The machine never retries and never
/// leaves a batch half-applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("State {state} is already managed by this state machine and cannot be added again{}", batch_note(.index))]
    DuplicateState { state: String, index: Option<usize> },

    #[error("Transition {transition} is already attached to state {state} and cannot be added again{}", batch_note(.index))]
    DuplicateTransition {
        transition: String,
        state: String,
        index: Option<usize>,
    },

    #[error("Transition {transition} points back to its starting state {state}{}", batch_note(.index))]
    SelfLoop {
        transition: String,
        state: String,
        index: Option<usize>,
    },

    #[error("Transition {transition} already starts at another state and cannot be attached to {state}{}", batch_note(.index))]
    TransitionAlreadyAttached {
        transition: String,
        state: String,
        index: Option<usize>,
    },

    #[error("State {state} is not managed by this state machine and cannot be used as the {role} state")]
    UnmanagedState { state: String, role: &'static str },

    #[error("Transition {transition} from {from} points to unmanaged state {target}")]
    DanglingTransition {
        transition: String,
        from: String,
        target: String,
    },

    #[error("No entry state specified. Call set_entry_state() before update()")]
    NoEntryState,

    #[error("Cannot force state {target}: no state is active yet")]
    NoCurrentState { target: String },
}

fn batch_note(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" (added by a batch call, at index {i})"),
        None => String::new(),
    }
}
