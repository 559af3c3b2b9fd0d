mod support;

use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use chat_console::{ConsoleConfig, ConsoleEvent, ConsoleInput, Identity, InputKey};
use pretty_assertions::assert_eq;
use support::{
    harness, harness_with, lock_unpoisoned, screen, CountdownPending, StuckPending, TraceOp,
};

fn type_text(h: &mut support::Harness, text: &str) {
    for ch in text.chars() {
        h.runtime
            .handle_key(InputKey::Char(ch), Instant::now())
            .expect("type");
    }
}

#[test]
fn typing_redraws_only_the_input_line() {
    let mut h = harness(40, 8);
    lock_unpoisoned(&h.terminal).clear();
    type_text(&mut h, "hey");

    let trace = lock_unpoisoned(&h.terminal);
    assert_eq!(trace.count(&TraceOp::ClearScreen), 0);
    assert_eq!(trace.flushes(), 3);
    assert_eq!(trace.row_text(7), "> hey");
    assert_eq!(trace.cursor, (7, 5));
    assert!(trace.cursor_visible);
}

#[test]
fn backspace_and_clear_edit_the_input() {
    let mut h = harness(40, 8);
    type_text(&mut h, "hello");
    h.runtime
        .handle_key(InputKey::Backspace, Instant::now())
        .expect("backspace");
    assert_eq!(screen(&h.terminal)[7], "> hell");

    h.runtime
        .handle_key(InputKey::ClearInput, Instant::now())
        .expect("clear");
    assert_eq!(screen(&h.terminal)[7], ">");
    assert_eq!(h.runtime.state().status.input(), "");
}

#[test]
fn long_input_shows_its_tail() {
    let mut h = harness(12, 8);
    type_text(&mut h, "abcdefghijklmnop");
    // 11 usable columns: the prompt plus nine characters.
    assert_eq!(screen(&h.terminal)[7], "> hijklmnop");
}

#[test]
fn enter_submits_trimmed_text_and_pauses_updates() {
    let config = ConsoleConfig {
        identity: Identity {
            location_id: "kitchen".to_string(),
            user_id: "u1".to_string(),
            user_name: "Sam".to_string(),
        },
        ..ConsoleConfig::default()
    };
    let mut h = harness_with(40, 8, config);
    type_text(&mut h, "  bake bread  ");

    let before = SystemTime::now();
    h.runtime
        .handle_key(InputKey::Enter, Instant::now())
        .expect("submit");

    let trace = lock_unpoisoned(&h.orchestrator);
    assert_eq!(trace.submits.len(), 1);
    let request = &trace.submits[0];
    assert_eq!(request.location_id, "kitchen");
    assert_eq!(request.user_id, "u1");
    assert_eq!(request.user_name, "Sam");
    assert_eq!(request.text, "bake bread");

    assert_eq!(trace.pauses.len(), 1);
    let pause = trace.pauses[0]
        .duration_since(before)
        .expect("pause is in the future");
    assert!(pause >= Duration::from_millis(2_900) && pause <= Duration::from_secs(4));

    // Submitted text only reaches the transcript once the orchestrator echoes it back.
    assert!(h.runtime.state().transcript.is_empty());
    assert_eq!(screen(&h.terminal)[7], ">");
}

#[test]
fn blank_input_is_not_submitted() {
    let mut h = harness(40, 8);
    type_text(&mut h, "   ");
    h.runtime
        .handle_key(InputKey::Enter, Instant::now())
        .expect("enter");
    h.runtime
        .handle_key(InputKey::Enter, Instant::now())
        .expect("enter");
    assert!(lock_unpoisoned(&h.orchestrator).submits.is_empty());
}

#[test]
fn handlers_are_noops_after_shutdown() {
    let mut h = harness(40, 8);
    h.runtime
        .handle_key(InputKey::Quit, Instant::now())
        .expect("quit");
    assert!(!h.runtime.is_running());
    lock_unpoisoned(&h.terminal).clear();

    let now = Instant::now();
    h.runtime
        .handle_event(
            ConsoleEvent::MessageAdded {
                speaker: "A".to_string(),
                body: "late".to_string(),
                is_user: false,
            },
            now,
        )
        .expect("ignored");
    h.runtime.handle_key(InputKey::Char('x'), now).expect("ignored");
    h.runtime.handle_key(InputKey::Enter, now).expect("ignored");
    h.runtime.handle_resize(80, 24, now).expect("ignored");
    h.runtime.tick(now + Duration::from_secs(1)).expect("ignored");

    assert!(h.runtime.state().transcript.is_empty());
    assert!(lock_unpoisoned(&h.terminal).ops.is_empty());
    assert!(lock_unpoisoned(&h.orchestrator).submits.is_empty());
    assert_eq!(h.runtime.next_deadline(), None);
}

#[test]
fn drain_waits_for_pending_work_to_reach_zero() {
    let config = ConsoleConfig {
        shutdown_poll: Duration::from_millis(1),
        ..ConsoleConfig::default()
    };
    let h = harness_with(40, 8, config);
    let pending = CountdownPending::new(3);
    assert!(h.runtime.drain_pending(&pending));
    assert_eq!(pending.polls.load(Ordering::SeqCst), 4);
}

#[test]
fn drain_gives_up_after_the_bound() {
    let config = ConsoleConfig {
        shutdown_poll: Duration::from_millis(5),
        shutdown_timeout: Duration::from_millis(30),
        ..ConsoleConfig::default()
    };
    let h = harness_with(40, 8, config);
    let started = Instant::now();
    assert!(!h.runtime.drain_pending(&StuckPending));
    assert!(started.elapsed() >= Duration::from_millis(30));
}

#[test]
fn run_processes_inputs_in_order_until_shutdown() {
    let mut h = harness(40, 8);
    let (tx, rx) = mpsc::channel();

    let sender = thread::spawn(move || {
        let inputs = [
            ConsoleInput::Event(ConsoleEvent::StreamDelta {
                speaker: "A".to_string(),
                fragment: "str".to_string(),
            }),
            ConsoleInput::Event(ConsoleEvent::StreamDelta {
                speaker: "A".to_string(),
                fragment: "eam".to_string(),
            }),
            ConsoleInput::Key(InputKey::Char('o')),
            ConsoleInput::Key(InputKey::Char('k')),
        ];
        for input in inputs {
            tx.send(input).expect("send");
        }
        // Let the coalesced redraw fire before shutting down.
        thread::sleep(Duration::from_millis(150));
        tx.send(ConsoleInput::Shutdown).expect("send");
    });

    h.runtime.run(&rx).expect("run");
    sender.join().expect("sender thread");

    assert!(!h.runtime.is_running());
    let rows = screen(&h.terminal);
    assert_eq!(rows[0], "A: stream");
    assert_eq!(rows[7], "> ok");
}

#[test]
fn run_stops_when_every_sender_is_gone() {
    let mut h = harness(40, 8);
    let (tx, rx) = mpsc::channel::<ConsoleInput>();
    drop(tx);
    h.runtime.run(&rx).expect("run");
    assert!(!h.runtime.is_running());
}
