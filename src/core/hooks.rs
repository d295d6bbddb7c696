//! Caller-supplied behavior for states and transitions.
//!
//! The engine owns the graph. The caller owns behavior, supplied by
//! implementing these traits (or through the closure builders in
//! [`crate::builder`]).

/// Lifecycle hooks of a concrete state.
///
/// The engine provides no default bodies. Hooks are only ever invoked by the
/// [`StateMachine`](crate::StateMachine) driver, synchronously, on the thread
/// that is ticking it.
///
/// # Example
///
/// ```rust
/// use stateful::core::StateHooks;
///
/// struct Blinking {
///     lit: bool,
/// }
///
/// impl StateHooks for Blinking {
///     fn on_enter_state(&mut self) {
///         self.lit = true;
///     }
///
///     fn while_in_state(&mut self) {
///         self.lit = !self.lit;
///     }
///
///     fn on_exit_state(&mut self) {
///         self.lit = false;
///     }
/// }
/// ```
pub trait StateHooks: Send {
    /// Called when the machine enters this state through a transition or a
    /// forced jump. Not called for the implicit activation of the entry state.
    fn on_enter_state(&mut self);

    /// Called on every tick while this state is active, before any guard of
    /// its outgoing transitions is evaluated.
    fn while_in_state(&mut self);

    /// Called when the machine leaves this state.
    fn on_exit_state(&mut self);
}

/// Guard and activation hook of a concrete transition.
pub trait TransitionHooks: Send {
    /// Whether the transition should fire on this tick.
    ///
    /// Evaluated at most once per tick, only while the transition's start
    /// state is active. May read outside state but must not rewire the graph.
    fn should_activate(&self) -> bool;

    /// Called exactly once when the transition fires, after the old state's
    /// exit hook and before the new state's enter hook.
    fn on_activated(&mut self);
}
