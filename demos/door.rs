//! Door State Machine
//!
//! This example polls a two-state machine for seven seconds. The door opens
//! three seconds in and closes again three seconds later.
//!
//! Key concepts:
//! - Hand-written `StateHooks` and `TransitionHooks` implementations
//! - Time-based guards evaluated on every poll
//! - Caller-owned polling loop
//!
//! Run with: RUST_LOG=stateful=debug cargo run --example door

use stateful::core::{State, StateHooks, Transition, TransitionHooks};
use stateful::{MachineConfig, StateMachine};
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

struct Door {
    enter: &'static str,
    exit: &'static str,
}

impl StateHooks for Door {
    fn on_enter_state(&mut self) {
        println!("{}", self.enter);
    }

    fn while_in_state(&mut self) {}

    fn on_exit_state(&mut self) {
        println!("{}", self.exit);
    }
}

/// Fires while the elapsed time is inside a half-second window.
struct Window {
    started: Instant,
    from: Duration,
    message: &'static str,
}

impl TransitionHooks for Window {
    fn should_activate(&self) -> bool {
        let elapsed = self.started.elapsed();
        elapsed > self.from && elapsed < self.from + Duration::from_millis(500)
    }

    fn on_activated(&mut self) {
        println!("{}", self.message);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Door State Machine ===\n");

    let started = Instant::now();

    let closed = State::named(
        "Closed",
        Door {
            enter: "Door is closed",
            exit: "Door is beginning to open",
        },
    );
    let opened = State::named(
        "Opened",
        Door {
            enter: "Door is open",
            exit: "Door is beginning to close",
        },
    );

    let opening = Transition::named(
        "opening",
        &opened,
        Window {
            started,
            from: Duration::from_secs(3),
            message: "Door is opening",
        },
    );
    let closing = Transition::named(
        "closing",
        &closed,
        Window {
            started,
            from: Duration::from_secs(6),
            message: "Door is closing",
        },
    );
    opened.add_transition(&closing)?;
    closed.add_transition(&opening)?;

    let mut machine = StateMachine::with_config(MachineConfig::named("door"));
    machine.add_states([&opened, &closed])?;
    machine.set_entry_state(&closed)?;

    while started.elapsed() < Duration::from_secs(7) {
        machine.update()?;
        thread::sleep(Duration::from_millis(10));
    }

    println!("\nFinal snapshot:\n{}", machine.snapshot().to_json()?);
    println!("\n=== Example Complete ===");
    Ok(())
}
