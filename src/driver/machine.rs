//! The polling driver.

use crate::config::{ForcedJumpPolicy, MachineConfig};
use crate::core::{State, StateId};
use crate::driver::outcome::TickOutcome;
use crate::driver::snapshot::{MachineSnapshot, StateSummary, TransitionSummary};
use crate::error::FsmError;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Drives a single active-state pointer over a set of managed states.
///
/// Registration (`add_state`, `add_states`) takes `&mut self` and belongs to
/// the setup phase. Once set up, the machine can be shared between threads:
/// `update`, `set_entry_state` and `set_current_state` take `&self` and are
/// serialized by one mutex owned by the machine.
///
/// Hooks and guards run synchronously while that mutex is held, so they must
/// not call `update`, `set_entry_state` or `set_current_state` on the same
/// machine. The read-only queries (`entry_state`, `current_state`,
/// `is_started`, `tick_count`, `entered_at`, `time_in_state` and `snapshot`)
/// never wait for a tick and are safe to call from a hook. During a tick a
/// guard sees the state it would leave, and an enter hook sees the state
/// being entered.
///
/// # Example
///
/// ```rust
/// use stateful::core::{State, StateHooks, Transition, TransitionHooks};
/// use stateful::{StateMachine, TickOutcome};
///
/// struct Idle;
///
/// impl StateHooks for Idle {
///     fn on_enter_state(&mut self) {}
///     fn while_in_state(&mut self) {}
///     fn on_exit_state(&mut self) {}
/// }
///
/// struct Always;
///
/// impl TransitionHooks for Always {
///     fn should_activate(&self) -> bool {
///         true
///     }
///     fn on_activated(&mut self) {}
/// }
///
/// let red = State::named("Red", Idle);
/// let green = State::named("Green", Idle);
/// red.add_transition(&Transition::new(&green, Always)).unwrap();
///
/// let mut machine = StateMachine::new();
/// machine.add_states([&red, &green]).unwrap();
/// machine.set_entry_state(&red).unwrap();
///
/// let outcome = machine.update().unwrap();
/// assert!(outcome.transitioned());
/// assert_eq!(machine.current_state(), Some(green));
/// ```
pub struct StateMachine {
    config: MachineConfig,
    states: Vec<State>,
    index: HashMap<StateId, usize>,
    turn: Mutex<()>,
    cursor: RwLock<Cursor>,
}

/// Written only while `turn` is held, and never across a hook call.
#[derive(Clone, Copy, Default)]
struct Cursor {
    entry: Option<StateId>,
    current: Option<StateId>,
    entered_at: Option<DateTime<Utc>>,
    ticks: u64,
}

impl StateMachine {
    /// Create an empty machine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            config,
            states: Vec::new(),
            index: HashMap::new(),
            turn: Mutex::new(()),
            cursor: RwLock::new(Cursor::default()),
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Register a state. Fails if the state is already managed.
    pub fn add_state(&mut self, state: &State) -> Result<(), FsmError> {
        if self.manages(state) {
            return Err(FsmError::DuplicateState {
                state: state.label().to_string(),
                index: None,
            });
        }
        self.insert(state);
        Ok(())
    }

    /// Register several states at once.
    ///
    /// Every element is checked before any is inserted, so a duplicate (of a
    /// managed state or of an earlier element) aborts the whole batch.
    pub fn add_states<'a, I>(&mut self, states: I) -> Result<(), FsmError>
    where
        I: IntoIterator<Item = &'a State>,
    {
        let batch: Vec<&State> = states.into_iter().collect();

        for (index, state) in batch.iter().enumerate() {
            let repeated = batch[..index].iter().any(|earlier| earlier == state);
            if repeated || self.manages(state) {
                return Err(FsmError::DuplicateState {
                    state: state.label().to_string(),
                    index: Some(index),
                });
            }
        }

        for state in batch {
            self.insert(state);
        }
        Ok(())
    }

    fn insert(&mut self, state: &State) {
        self.index.insert(state.id(), self.states.len());
        self.states.push(state.clone());
        tracing::debug!(machine = %self.config.name, state = %state.label(), "state registered");
    }

    pub fn manages(&self, state: &State) -> bool {
        self.index.contains_key(&state.id())
    }

    /// Managed states in registration order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.index.get(&id).map(|&i| &self.states[i])
    }

    /// Choose the state the machine starts in on its first tick.
    ///
    /// No hook runs, and an already running machine keeps its current state.
    pub fn set_entry_state(&self, state: &State) -> Result<(), FsmError> {
        let _turn = self.turn.lock();
        self.require_managed(state, "entry")?;

        self.cursor.write().entry = Some(state.id());
        tracing::debug!(machine = %self.config.name, state = %state.label(), "entry state set");
        Ok(())
    }

    /// Jump to `state` immediately: exit the current state, then enter `state`.
    ///
    /// Before anything is active, [`ForcedJumpPolicy`] decides whether the jump
    /// skips the exit hook or is rejected. Jumping to the current state exits
    /// and re-enters it.
    pub fn set_current_state(&self, state: &State) -> Result<(), FsmError> {
        let _turn = self.turn.lock();
        self.require_managed(state, "current")?;

        let current = self.cursor.read().current;
        match current.and_then(|id| self.state(id)) {
            Some(previous) => {
                tracing::debug!(
                    machine = %self.config.name,
                    from = %previous.label(),
                    to = %state.label(),
                    "forced jump"
                );
                previous.exit();
            }
            None => match self.config.forced_jump {
                ForcedJumpPolicy::SkipExit => {
                    tracing::warn!(
                        machine = %self.config.name,
                        to = %state.label(),
                        "forced jump before any state was active; skipping exit hook"
                    );
                }
                ForcedJumpPolicy::Reject => {
                    return Err(FsmError::NoCurrentState {
                        target: state.label().to_string(),
                    });
                }
            },
        }

        self.move_to(state.id());
        state.enter();
        Ok(())
    }

    fn require_managed(&self, state: &State, role: &'static str) -> Result<(), FsmError> {
        if self.manages(state) {
            Ok(())
        } else {
            Err(FsmError::UnmanagedState {
                state: state.label().to_string(),
                role,
            })
        }
    }

    /// Run one tick.
    ///
    /// 1. Fails with [`FsmError::NoEntryState`] if no entry state is set.
    /// 2. On the first tick the entry state becomes current, without its
    ///    enter hook.
    /// 3. Fails with [`FsmError::DanglingTransition`] if any transition of any
    ///    managed state targets an unmanaged state.
    /// 4. Runs the current state's `while_in_state`.
    /// 5. Fires the first outgoing transition, in registration order, whose
    ///    guard holds: exit, activation, pointer swap, enter.
    ///
    /// At most one transition fires per tick. Guards after the first satisfied
    /// one are not evaluated.
    pub fn update(&self) -> Result<TickOutcome, FsmError> {
        let _turn = self.turn.lock();
        let Cursor { entry, current, .. } = *self.cursor.read();
        let entry = entry.ok_or(FsmError::NoEntryState)?;

        let current_id = match current {
            Some(id) => id,
            None => {
                self.move_to(entry);
                tracing::debug!(
                    machine = %self.config.name,
                    state = %self.label_of(entry),
                    "started at entry state"
                );
                entry
            }
        };

        if let Some(err) = self.dangling().next() {
            return Err(err);
        }

        let current = self
            .state(current_id)
            .ok_or_else(|| FsmError::UnmanagedState {
                state: current_id.to_string(),
                role: "current",
            })?;

        let tick = {
            let mut cursor = self.cursor.write();
            cursor.ticks += 1;
            cursor.ticks
        };
        tracing::trace!(
            machine = %self.config.name,
            state = %current.label(),
            tick,
            "tick"
        );
        current.tick();

        let Some(transition) = current
            .transitions()
            .into_iter()
            .find(|t| t.should_activate())
        else {
            return Ok(TickOutcome::Stayed { state: current_id });
        };

        // The periodic hook may have attached a new edge since validation.
        let next = self
            .state(transition.end())
            .ok_or_else(|| FsmError::DanglingTransition {
                transition: transition.label().to_string(),
                from: current.label().to_string(),
                target: transition.end_label().to_string(),
            })?;

        current.exit();
        transition.activate();
        self.move_to(next.id());
        next.enter();

        tracing::debug!(
            machine = %self.config.name,
            from = %current.label(),
            to = %next.label(),
            transition = %transition.label(),
            "transitioned"
        );

        Ok(TickOutcome::Transitioned {
            from: current_id,
            to: next.id(),
            via: transition.id(),
        })
    }

    fn move_to(&self, state: StateId) {
        let mut cursor = self.cursor.write();
        cursor.current = Some(state);
        cursor.entered_at = Some(Utc::now());
    }

    /// Check every transition of every managed state, reporting all edges to
    /// unmanaged states at once.
    ///
    /// `update` performs the same check but stops at the first problem.
    pub fn audit(&self) -> Validation<(), NonEmptyVec<FsmError>> {
        let checks: Vec<Validation<(), NonEmptyVec<FsmError>>> =
            self.dangling().map(Validation::fail).collect();

        if checks.is_empty() {
            return Validation::success(());
        }
        Validation::all_vec(checks).map(|_| ())
    }

    fn dangling(&self) -> impl Iterator<Item = FsmError> + '_ {
        self.states.iter().flat_map(move |state| {
            state
                .transitions()
                .into_iter()
                .filter(move |t| !self.index.contains_key(&t.end()))
                .map(move |t| FsmError::DanglingTransition {
                    transition: t.label().to_string(),
                    from: state.label().to_string(),
                    target: t.end_label().to_string(),
                })
        })
    }

    fn label_of(&self, id: StateId) -> String {
        self.state(id)
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn entry_state(&self) -> Option<State> {
        let entry = self.cursor.read().entry;
        entry.and_then(|id| self.state(id)).cloned()
    }

    /// The active state, or `None` before the first tick or forced jump.
    pub fn current_state(&self) -> Option<State> {
        let current = self.cursor.read().current;
        current.and_then(|id| self.state(id)).cloned()
    }

    pub fn is_started(&self) -> bool {
        self.cursor.read().current.is_some()
    }

    /// Number of ticks that reached the periodic hook.
    pub fn tick_count(&self) -> u64 {
        self.cursor.read().ticks
    }

    /// When the active state became active.
    pub fn entered_at(&self) -> Option<DateTime<Utc>> {
        self.cursor.read().entered_at
    }

    /// Wall-clock time spent in the active state so far.
    pub fn time_in_state(&self) -> Option<Duration> {
        self.entered_at().map(|at| {
            Utc::now()
                .signed_duration_since(at)
                .to_std()
                .unwrap_or(Duration::ZERO)
        })
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        let Cursor {
            entry,
            current,
            entered_at,
            ticks,
        } = *self.cursor.read();

        let states = self
            .states
            .iter()
            .map(|state| StateSummary {
                id: state.id(),
                label: state.label().to_string(),
                transitions: state
                    .transitions()
                    .iter()
                    .map(|t| TransitionSummary {
                        id: t.id(),
                        label: t.label().to_string(),
                        to: t.end(),
                        to_label: t.end_label().to_string(),
                        dangling: !self.index.contains_key(&t.end()),
                    })
                    .collect(),
            })
            .collect();

        MachineSnapshot {
            name: self.config.name.clone(),
            entry,
            current,
            ticks,
            entered_at,
            states,
        }
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
