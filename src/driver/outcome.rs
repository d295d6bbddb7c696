//! What a single tick did.

use crate::core::{StateId, TransitionId};
use serde::{Deserialize, Serialize};

/// Result of one call to [`StateMachine::update`](crate::StateMachine::update).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TickOutcome {
    /// No guard was satisfied; the state stayed active.
    Stayed { state: StateId },

    /// A transition fired.
    Transitioned {
        from: StateId,
        to: StateId,
        via: TransitionId,
    },
}

impl TickOutcome {
    /// The state active after the tick.
    pub fn current(&self) -> StateId {
        match self {
            Self::Stayed { state } => *state,
            Self::Transitioned { to, .. } => *to,
        }
    }

    pub fn transitioned(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}
