//! Opaque identities for states and transitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a [`State`](super::State), assigned at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(Uuid);

/// Stable identity of a [`Transition`](super::Transition), assigned at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(Uuid);

impl StateId {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short hex tag used in default labels.
    pub fn tag(&self) -> String {
        short_tag(&self.0)
    }
}

impl TransitionId {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short hex tag used in default labels.
    pub fn tag(&self) -> String {
        short_tag(&self.0)
    }
}

fn short_tag(id: &Uuid) -> String {
    let mut hex = id.simple().to_string();
    hex.truncate(8);
    hex
}

/// Label used when the caller does not name a state or transition:
/// the hook type's name followed by the identity tag.
pub(crate) fn default_label<H: ?Sized>(tag: &str) -> String {
    let type_name = std::any::type_name::<H>();
    let base = type_name.split('<').next().unwrap_or(type_name);
    let short = base.rsplit("::").next().unwrap_or(base);
    format!("{short}@{tag}")
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
