//! Serializable view of a machine, for diagnostics.
//!
//! A snapshot describes the graph and the cursor at one instant. It carries
//! no hooks, so it cannot be turned back into a machine.

use crate::core::{StateId, TransitionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub name: String,
    pub entry: Option<StateId>,
    pub current: Option<StateId>,
    pub ticks: u64,
    /// When the active state was entered.
    pub entered_at: Option<DateTime<Utc>>,
    /// Managed states in registration order.
    pub states: Vec<StateSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    pub id: StateId,
    pub label: String,
    /// Outgoing transitions in guard priority order.
    pub transitions: Vec<TransitionSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSummary {
    pub id: TransitionId,
    pub label: String,
    pub to: StateId,
    pub to_label: String,
    /// The target is not managed by the machine.
    pub dangling: bool,
}

impl MachineSnapshot {
    pub fn state(&self, id: StateId) -> Option<&StateSummary> {
        self.states.iter().find(|s| s.id == id)
    }

    pub fn current_label(&self) -> Option<&str> {
        self.current
            .and_then(|id| self.state(id))
            .map(|s| s.label.as_str())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
