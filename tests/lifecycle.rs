//! End-to-end scenarios: a polled door, shared machines, hooks that rewire.

use parking_lot::Mutex;
use stateful::builder::{
    guarded_transition, passive_state, StateBuilder, StateMachineBuilder, TransitionBuilder,
};
use stateful::{FsmError, State, StateMachine, TickOutcome};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use std::thread;
use std::time::{Duration, Instant};

type Log = Arc<Mutex<Vec<&'static str>>>;

fn say(log: &Log, line: &'static str) -> impl FnMut() + Send + 'static {
    let log = Arc::clone(log);
    move || log.lock().push(line)
}

#[test]
fn door_opens_and_closes_on_schedule() {
    let clock = Arc::new(AtomicU64::new(0));
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    let closed = StateBuilder::named("Closed")
        .on_enter(say(&log, "Door is closed"))
        .on_exit(say(&log, "Door is beginning to open"))
        .build();
    let opened = StateBuilder::named("Opened")
        .on_enter(say(&log, "Door is open"))
        .on_exit(say(&log, "Door is beginning to close"))
        .build();

    let opening = {
        let clock = Arc::clone(&clock);
        TransitionBuilder::new(&opened)
            .named("opening")
            .when(move || (3001..3500).contains(&clock.load(Ordering::SeqCst)))
            .on_activated(say(&log, "Door is opening"))
            .build()
            .unwrap()
    };
    let closing = {
        let clock = Arc::clone(&clock);
        TransitionBuilder::new(&closed)
            .named("closing")
            .when(move || (6001..6500).contains(&clock.load(Ordering::SeqCst)))
            .on_activated(say(&log, "Door is closing"))
            .build()
            .unwrap()
    };
    opened.add_transition(&closing).unwrap();
    closed.add_transition(&opening).unwrap();

    let machine = StateMachineBuilder::new()
        .name("door")
        .states([&opened, &closed])
        .entry(&closed)
        .build()
        .unwrap();

    let mut fired = 0;
    for now in (0..=7000).step_by(100) {
        clock.store(now, Ordering::SeqCst);
        if machine.update().unwrap().transitioned() {
            fired += 1;
        }
    }

    assert_eq!(fired, 2);
    assert_eq!(
        *log.lock(),
        vec![
            "Door is beginning to open",
            "Door is opening",
            "Door is open",
            "Door is beginning to close",
            "Door is closing",
            "Door is closed",
        ]
    );
    assert_eq!(machine.current_state(), Some(closed));
    assert_eq!(machine.tick_count(), 71);
}

#[test]
fn shared_machine_serializes_ticks() {
    let enters = Arc::new(AtomicUsize::new(0));
    let ring: Vec<State> = (0..4)
        .map(|i| {
            let enters = Arc::clone(&enters);
            StateBuilder::named(format!("R{i}"))
                .on_enter(move || {
                    enters.fetch_add(1, Ordering::SeqCst);
                })
                .build()
        })
        .collect();
    for (i, state) in ring.iter().enumerate() {
        state
            .add_transition(&guarded_transition(&ring[(i + 1) % 4], || true))
            .unwrap();
    }

    let mut machine = StateMachine::new();
    machine.add_states(&ring).unwrap();
    machine.set_entry_state(&ring[0]).unwrap();
    let machine = Arc::new(machine);

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let machine = Arc::clone(&machine);
            thread::spawn(move || {
                for _ in 0..250 {
                    let outcome = machine.update().unwrap();
                    assert!(outcome.transitioned());
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(machine.tick_count(), 1000);
    assert_eq!(enters.load(Ordering::SeqCst), 1000);
    assert_eq!(machine.current_state(), Some(ring[0].clone()));
}

#[test]
fn edge_attached_by_periodic_hook_is_validated_before_firing() {
    let slot: Arc<OnceLock<State>> = Arc::new(OnceLock::new());
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let stray = passive_state("Stray");
    let escape = guarded_transition(&stray, || true);

    let a = {
        let slot = Arc::clone(&slot);
        let escape = escape.clone();
        StateBuilder::named("A")
            .while_in(move || {
                if let Some(me) = slot.get() {
                    if !escape.is_attached() {
                        me.add_transition(&escape).unwrap();
                    }
                }
            })
            .on_exit(say(&log, "A.exit"))
            .build()
    };
    slot.set(a.clone()).unwrap();

    let mut machine = StateMachine::new();
    machine.add_state(&a).unwrap();
    machine.set_entry_state(&a).unwrap();

    let err = machine.update().unwrap_err();

    assert!(matches!(
        err,
        FsmError::DanglingTransition { ref from, ref target, .. } if from == "A" && target == "Stray"
    ));
    assert!(log.lock().is_empty());
    assert_eq!(machine.current_state(), Some(a.clone()));
    assert_eq!(a.transition_count(), 1);

    machine.add_state(&stray).unwrap();
    let outcome = machine.update().unwrap();
    assert_eq!(
        outcome,
        TickOutcome::Transitioned {
            from: a.id(),
            to: stray.id(),
            via: escape.id(),
        }
    );
    assert_eq!(*log.lock(), vec!["A.exit"]);
}

#[test]
fn forced_jump_then_polling_continues_from_target() {
    let a = passive_state("A");
    let b = passive_state("B");
    let c = passive_state("C");
    b.add_transition(&guarded_transition(&c, || true)).unwrap();

    let machine = StateMachineBuilder::new()
        .states([&a, &b, &c])
        .entry(&a)
        .build()
        .unwrap();

    machine.update().unwrap();
    machine.set_current_state(&b).unwrap();
    let outcome = machine.update().unwrap();

    assert_eq!(outcome.current(), c.id());
    assert_eq!(machine.snapshot().current_label(), Some("C"));
}

#[test]
fn guard_on_time_in_state_fires_after_threshold() {
    let slot: Arc<OnceLock<Weak<StateMachine>>> = Arc::new(OnceLock::new());
    let waiting = passive_state("Waiting");
    let done = passive_state("Done");

    let after_dwell = {
        let slot = Arc::clone(&slot);
        guarded_transition(&done, move || {
            slot.get()
                .and_then(Weak::upgrade)
                .and_then(|machine| machine.time_in_state())
                .is_some_and(|dwell| dwell >= Duration::from_millis(30))
        })
    };
    waiting.add_transition(&after_dwell).unwrap();

    let machine = Arc::new(
        StateMachineBuilder::new()
            .states([&waiting, &done])
            .entry(&waiting)
            .build()
            .unwrap(),
    );
    slot.set(Arc::downgrade(&machine)).unwrap();

    let started = Instant::now();
    assert!(!machine.update().unwrap().transitioned());

    let deadline = started + Duration::from_secs(5);
    let mut fired = false;
    while Instant::now() < deadline {
        if machine.update().unwrap().transitioned() {
            fired = true;
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }

    assert!(fired);
    assert!(started.elapsed() >= Duration::from_millis(30));
    assert_eq!(machine.current_state(), Some(done));
}

#[test]
fn forced_jumps_and_ticks_never_interleave() {
    // `inside` tracks whether some state is active; hooks must alternate.
    let inside = Arc::new(AtomicBool::new(true));
    let overlaps = Arc::new(AtomicUsize::new(0));
    let enters = Arc::new(AtomicUsize::new(0));
    let exits = Arc::new(AtomicUsize::new(0));

    let ring: Vec<State> = (0..4)
        .map(|i| {
            let (enter_inside, enter_overlaps) = (Arc::clone(&inside), Arc::clone(&overlaps));
            let (exit_inside, exit_overlaps) = (Arc::clone(&inside), Arc::clone(&overlaps));
            let (enters, exits) = (Arc::clone(&enters), Arc::clone(&exits));
            StateBuilder::named(format!("R{i}"))
                .on_enter(move || {
                    if enter_inside.swap(true, Ordering::SeqCst) {
                        enter_overlaps.fetch_add(1, Ordering::SeqCst);
                    }
                    enters.fetch_add(1, Ordering::SeqCst);
                })
                .on_exit(move || {
                    if !exit_inside.swap(false, Ordering::SeqCst) {
                        exit_overlaps.fetch_add(1, Ordering::SeqCst);
                    }
                    exits.fetch_add(1, Ordering::SeqCst);
                })
                .build()
        })
        .collect();
    for (i, state) in ring.iter().enumerate() {
        state
            .add_transition(&guarded_transition(&ring[(i + 1) % 4], || true))
            .unwrap();
    }

    let mut machine = StateMachine::new();
    machine.add_states(&ring).unwrap();
    machine.set_entry_state(&ring[0]).unwrap();
    // Start the machine so every later jump has a state to exit.
    machine.update().unwrap();
    let machine = Arc::new(machine);

    let tickers: Vec<_> = (0..3)
        .map(|_| {
            let machine = Arc::clone(&machine);
            thread::spawn(move || {
                for _ in 0..200 {
                    machine.update().unwrap();
                }
            })
        })
        .collect();
    let jumper = {
        let machine = Arc::clone(&machine);
        let ring = ring.clone();
        thread::spawn(move || {
            for i in 0..200 {
                machine.set_current_state(&ring[i % 4]).unwrap();
            }
        })
    };
    for worker in tickers {
        worker.join().unwrap();
    }
    jumper.join().unwrap();

    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    assert_eq!(enters.load(Ordering::SeqCst), exits.load(Ordering::SeqCst));
    // One firing per tick, including the start-up tick, plus one exit and enter per jump.
    assert_eq!(enters.load(Ordering::SeqCst), 601 + 200);
    assert_eq!(machine.tick_count(), 601);
}
