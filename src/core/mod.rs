//! Core graph entities.
//!
//! This module contains the nodes and edges of the state machine:
//! - States via the [`State`] handle and the caller's [`StateHooks`]
//! - Transitions via the [`Transition`] handle and the caller's [`TransitionHooks`]
//! - Guard predicates for closure-based transitions
//!
//! Nothing here drives the graph; that is the job of
//! [`StateMachine`](crate::StateMachine).

mod guard;
mod hooks;
mod id;
mod state;
mod transition;

pub use guard::Guard;
pub use hooks::{StateHooks, TransitionHooks};
pub use id::{StateId, TransitionId};
pub use state::State;
pub use transition::Transition;
