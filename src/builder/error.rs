//! Build errors for state machine and transition builders.

use crate::config::ConfigError;
use crate::error::FsmError;
use thiserror::Error;

/// Errors that can occur when building state machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition guard not specified. Call .when(predicate) or .guard(guard)")]
    MissingGuard,

    #[error("Invalid machine configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fsm(#[from] FsmError),
}
