//! Directed, guarded edges between states.

use super::hooks::TransitionHooks;
use super::id::{default_label, StateId, TransitionId};
use super::state::State;
use parking_lot::Mutex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A transition from one [`State`] to another.
///
/// The end state is fixed at construction. The start state is recorded when
/// the transition is attached with [`State::add_transition`] and never changes
/// once the attachment succeeds. Handles are cheap to clone and compare by
/// identity.
///
/// The end state is held as a [`StateId`], not a reference: the machine
/// resolves it against its managed states on every tick.
#[derive(Clone)]
pub struct Transition {
    inner: Arc<TransitionNode>,
}

struct TransitionNode {
    id: TransitionId,
    label: String,
    end: StateId,
    end_label: String,
    start: Mutex<Option<StateId>>,
    hooks: Mutex<Box<dyn TransitionHooks>>,
}

impl Transition {
    /// Create a transition ending at `end`, labelled after the hook type.
    pub fn new<H: TransitionHooks + 'static>(end: &State, hooks: H) -> Self {
        let id = TransitionId::fresh();
        let label = default_label::<H>(&id.tag());
        Self::from_parts(id, label, end, Box::new(hooks))
    }

    /// Create a transition ending at `end` with an explicit label.
    pub fn named<H: TransitionHooks + 'static>(
        name: impl Into<String>,
        end: &State,
        hooks: H,
    ) -> Self {
        Self::from_parts(TransitionId::fresh(), name.into(), end, Box::new(hooks))
    }

    pub(crate) fn from_parts(
        id: TransitionId,
        label: String,
        end: &State,
        hooks: Box<dyn TransitionHooks>,
    ) -> Self {
        Self {
            inner: Arc::new(TransitionNode {
                id,
                label,
                end: end.id(),
                end_label: end.label().to_string(),
                start: Mutex::new(None),
                hooks: Mutex::new(hooks),
            }),
        }
    }

    pub fn id(&self) -> TransitionId {
        self.inner.id
    }

    /// Diagnostic label.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// The state this transition leads to.
    pub fn end(&self) -> StateId {
        self.inner.end
    }

    /// Label of the end state, captured at construction.
    pub fn end_label(&self) -> &str {
        &self.inner.end_label
    }

    /// The state this transition was attached to, if any.
    pub fn start(&self) -> Option<StateId> {
        *self.inner.start.lock()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.start.lock().is_some()
    }

    /// Records the start state. Returns `false` if one was already recorded.
    pub(crate) fn attach(&self, start: StateId) -> bool {
        let mut slot = self.inner.start.lock();
        if slot.is_some() {
            return false;
        }
        *slot = Some(start);
        true
    }

    /// Undoes an [`attach`](Self::attach) by `start`. A claim held by another
    /// state is left alone.
    pub(crate) fn detach(&self, start: StateId) {
        let mut slot = self.inner.start.lock();
        if *slot == Some(start) {
            *slot = None;
        }
    }

    pub(crate) fn should_activate(&self) -> bool {
        self.inner.hooks.lock().should_activate()
    }

    pub(crate) fn activate(&self) {
        self.inner.hooks.lock().on_activated();
    }
}

impl PartialEq for Transition {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Transition {}

impl Hash for Transition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.label)
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("label", &self.inner.label)
            .field("end", &self.inner.end_label)
            .field("attached", &self.is_attached())
            .finish()
    }
}
