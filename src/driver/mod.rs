//! The polling driver around the core graph.
//!
//! # Key Concepts
//!
//! - **Registration**: states are registered on the machine during setup
//! - **Ticks**: the caller polls [`StateMachine::update`] at its own cadence
//! - **Outcomes**: every tick reports whether a transition fired
//! - **Snapshots**: a serializable view of the graph for diagnostics

mod machine;
mod outcome;
mod snapshot;

pub use machine::StateMachine;
pub use outcome::TickOutcome;
pub use snapshot::{MachineSnapshot, StateSummary, TransitionSummary};
