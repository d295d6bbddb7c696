//! Stateful: a polled finite state machine with lifecycle hooks.
//!
//! The caller defines states and the guarded transitions between them, then
//! polls the machine. Each poll runs the active state's periodic hook and
//! fires at most one transition whose guard holds.
//!
//! # Core Concepts
//!
//! - **State**: a node owning its outgoing transitions and the caller's
//!   enter/while/exit hooks
//! - **Transition**: a directed edge with a guard and an activation hook
//! - **StateMachine**: the driver that owns the managed states and the single
//!   active-state pointer
//!
//! There is no event dispatch: transitions are only evaluated when
//! [`StateMachine::update`] is called.
//!
//! # Example
//!
//! ```rust
//! use stateful::builder::{StateBuilder, StateMachineBuilder, TransitionBuilder};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let button = Arc::new(AtomicBool::new(false));
//!
//! let closed = StateBuilder::named("Closed").build();
//! let opened = StateBuilder::named("Opened").build();
//!
//! let pressed = Arc::clone(&button);
//! let opening = TransitionBuilder::new(&opened)
//!     .named("opening")
//!     .when(move || pressed.load(Ordering::SeqCst))
//!     .build()
//!     .unwrap();
//! closed.add_transition(&opening).unwrap();
//!
//! let machine = StateMachineBuilder::new()
//!     .name("door")
//!     .states([&closed, &opened])
//!     .entry(&closed)
//!     .build()
//!     .unwrap();
//!
//! assert!(!machine.update().unwrap().transitioned());
//! button.store(true, Ordering::SeqCst);
//! assert!(machine.update().unwrap().transitioned());
//! assert_eq!(machine.current_state(), Some(opened));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Guard, State, StateHooks, StateId, Transition, TransitionHooks, TransitionId,
};
pub use config::{ForcedJumpPolicy, MachineConfig};
pub use driver::{MachineSnapshot, StateMachine, TickOutcome};
pub use error::FsmError;
