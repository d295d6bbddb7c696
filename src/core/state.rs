//! States and their outgoing transitions.

use super::hooks::StateHooks;
use super::id::{default_label, StateId};
use super::transition::Transition;
use crate::error::FsmError;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A node of the state machine.
///
/// A state owns the ordered list of transitions that start at it, and the
/// caller's [`StateHooks`]. It does not know which machine manages it.
/// Handles are cheap to clone; clones refer to the same state, and equality
/// is identity, never structure.
///
/// # Example
///
/// ```rust
/// use stateful::core::{State, StateHooks, Transition, TransitionHooks};
///
/// struct Idle;
///
/// impl StateHooks for Idle {
///     fn on_enter_state(&mut self) {}
///     fn while_in_state(&mut self) {}
///     fn on_exit_state(&mut self) {}
/// }
///
/// struct Never;
///
/// impl TransitionHooks for Never {
///     fn should_activate(&self) -> bool {
///         false
///     }
///     fn on_activated(&mut self) {}
/// }
///
/// let closed = State::named("Closed", Idle);
/// let opened = State::named("Opened", Idle);
/// let opening = Transition::new(&opened, Never);
///
/// closed.add_transition(&opening).unwrap();
/// assert_eq!(opening.start(), Some(closed.id()));
///
/// // The same transition cannot be attached twice.
/// assert!(closed.add_transition(&opening).is_err());
/// assert_eq!(closed.transition_count(), 1);
/// ```
#[derive(Clone)]
pub struct State {
    inner: Arc<StateNode>,
}

struct StateNode {
    id: StateId,
    label: String,
    hooks: Mutex<Box<dyn StateHooks>>,
    transitions: RwLock<Vec<Transition>>,
}

impl State {
    /// Create a state labelled after its hook type and identity tag.
    pub fn new<H: StateHooks + 'static>(hooks: H) -> Self {
        let id = StateId::fresh();
        let label = default_label::<H>(&id.tag());
        Self::from_parts(id, label, Box::new(hooks))
    }

    /// Create a state with an explicit label.
    pub fn named<H: StateHooks + 'static>(name: impl Into<String>, hooks: H) -> Self {
        Self::from_parts(StateId::fresh(), name.into(), Box::new(hooks))
    }

    pub(crate) fn from_parts(id: StateId, label: String, hooks: Box<dyn StateHooks>) -> Self {
        Self {
            inner: Arc::new(StateNode {
                id,
                label,
                hooks: Mutex::new(hooks),
                transitions: RwLock::new(Vec::new()),
            }),
        }
    }

    pub fn id(&self) -> StateId {
        self.inner.id
    }

    /// Diagnostic label, used in error messages and logs.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Outgoing transitions in registration order.
    pub fn transitions(&self) -> Vec<Transition> {
        self.inner.transitions.read().clone()
    }

    pub fn transition_count(&self) -> usize {
        self.inner.transitions.read().len()
    }

    /// Attach a transition that starts at this state.
    ///
    /// Registration order is guard priority: when several guards are true on
    /// the same tick, the earliest attached transition fires.
    ///
    /// Fails if the transition is already attached here, points back at this
    /// state, or already starts at another state. Nothing changes on failure.
    pub fn add_transition(&self, transition: &Transition) -> Result<(), FsmError> {
        let mut owned = self.inner.transitions.write();
        self.check_attachable(&owned, &[], transition, None)?;

        if !transition.attach(self.id()) {
            return Err(self.attached_elsewhere(transition, None));
        }
        owned.push(transition.clone());

        tracing::debug!(
            state = %self.label(),
            transition = %transition.label(),
            target = %transition.end_label(),
            "transition attached"
        );
        Ok(())
    }

    /// Attach several transitions at once.
    ///
    /// Every element is validated before anything is attached: either the
    /// whole batch is attached, in order, or none of it is. The error names
    /// the index of the first offending element.
    pub fn add_transitions<'a, I>(&self, transitions: I) -> Result<(), FsmError>
    where
        I: IntoIterator<Item = &'a Transition>,
    {
        let batch: Vec<&Transition> = transitions.into_iter().collect();
        let mut owned = self.inner.transitions.write();

        for (index, transition) in batch.iter().enumerate() {
            self.check_attachable(&owned, &batch[..index], transition, Some(index))?;
        }

        self.claim_all(&batch)?;
        owned.extend(batch.iter().map(|t| (*t).clone()));

        tracing::debug!(
            state = %self.label(),
            count = batch.len(),
            "transitions attached"
        );
        Ok(())
    }

    fn check_attachable(
        &self,
        owned: &[Transition],
        earlier: &[&Transition],
        transition: &Transition,
        index: Option<usize>,
    ) -> Result<(), FsmError> {
        let duplicate = owned.iter().any(|t| t == transition)
            || earlier.iter().any(|t| *t == transition);
        if duplicate {
            return Err(FsmError::DuplicateTransition {
                transition: transition.label().to_string(),
                state: self.label().to_string(),
                index,
            });
        }

        if transition.end() == self.id() {
            return Err(FsmError::SelfLoop {
                transition: transition.label().to_string(),
                state: self.label().to_string(),
                index,
            });
        }

        if transition.is_attached() {
            return Err(self.attached_elsewhere(transition, index));
        }

        Ok(())
    }

    /// Record this state as the start of every transition in `batch`.
    ///
    /// Another state may claim an element between validation and this call.
    /// The claims already taken are then released, so the batch stays
    /// unattached as a whole.
    fn claim_all(&self, batch: &[&Transition]) -> Result<(), FsmError> {
        for (index, transition) in batch.iter().enumerate() {
            if !transition.attach(self.id()) {
                for claimed in &batch[..index] {
                    claimed.detach(self.id());
                }
                return Err(self.attached_elsewhere(transition, Some(index)));
            }
        }
        Ok(())
    }

    fn attached_elsewhere(&self, transition: &Transition, index: Option<usize>) -> FsmError {
        FsmError::TransitionAlreadyAttached {
            transition: transition.label().to_string(),
            state: self.label().to_string(),
            index,
        }
    }

    pub(crate) fn enter(&self) {
        self.inner.hooks.lock().on_enter_state();
    }

    pub(crate) fn tick(&self) {
        self.inner.hooks.lock().while_in_state();
    }

    pub(crate) fn exit(&self) {
        self.inner.hooks.lock().on_exit_state();
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.label)
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("label", &self.inner.label)
            .field("id", &self.inner.id)
            .finish()
    }
}
