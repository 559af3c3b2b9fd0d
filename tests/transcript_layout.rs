mod support;

use std::time::Instant;

use chat_console::{ConsoleEvent, Geometry, UnicodeWidth};
use chat_console::render::transcript::render_transcript;
use chat_console::state::transcript::{EntryKind, TranscriptBuffer};
use pretty_assertions::assert_eq;
use support::{harness, lock_unpoisoned, screen, TraceOp};

fn message(speaker: &str, body: &str) -> ConsoleEvent {
    ConsoleEvent::MessageAdded {
        speaker: speaker.to_string(),
        body: body.to_string(),
        is_user: false,
    }
}

#[test]
fn two_hundred_columns_wrap_into_three_indented_rows_at_ninety_columns() {
    let mut h = harness(90, 23);
    h.runtime
        .handle_event(message("Alice", &"x".repeat(200)), Instant::now())
        .expect("draw");

    let rows = screen(&h.terminal);
    assert_eq!(rows[0], format!("Alice: {}", "x".repeat(82)));
    assert_eq!(rows[1], format!("{}{}", " ".repeat(7), "x".repeat(82)));
    assert_eq!(rows[2], format!("{}{}", " ".repeat(7), "x".repeat(36)));
    assert_eq!(rows[3], "");
    assert!(rows[20].starts_with("─ Chat"));
    assert_eq!(rows[22], ">");
}

#[test]
fn new_messages_trigger_an_immediate_full_redraw() {
    let mut h = harness(40, 10);
    lock_unpoisoned(&h.terminal).clear();

    h.runtime
        .handle_event(message("Bob", "hi"), Instant::now())
        .expect("draw");

    let trace = lock_unpoisoned(&h.terminal);
    assert_eq!(trace.count(&TraceOp::ClearScreen), 1);
    assert_eq!(trace.flushes(), 1);
    assert_eq!(trace.row_text(0), "Bob: hi");
}

#[test]
fn oldest_messages_scroll_off_as_whole_entries() {
    // Seven message rows.
    let mut h = harness(40, 10);
    let now = Instant::now();
    h.runtime.handle_event(message("A", "one\ntwo\nthree"), now).expect("draw");
    h.runtime.handle_event(message("B", "four\nfive"), now).expect("draw");
    h.runtime.handle_event(message("C", "six\nseven\neight"), now).expect("draw");

    let rows = screen(&h.terminal);
    assert_eq!(
        &rows[..7],
        &["B: four", "   five", "C: six", "   seven", "   eight", "", ""]
    );
}

#[test]
fn capacity_drops_the_oldest_entry() {
    let mut buffer = TranscriptBuffer::new(100);
    for index in 0..101 {
        buffer.push("A", format!("m{index}"), EntryKind::Normal);
    }
    assert_eq!(buffer.len(), 100);
    assert_eq!(buffer.entries()[0].body, "m1");

    let lines = render_transcript(buffer.entries(), Geometry::new(40, 6), &UnicodeWidth);
    let texts: Vec<String> = lines.iter().map(|line| line.text()).collect();
    assert_eq!(texts, vec!["A: m98", "A: m99", "A: m100"]);
}

#[test]
fn tool_calls_collapse_to_one_dim_line() {
    let mut h = harness(40, 10);
    let event = ConsoleEvent::from_json(
        r#"{"event":"tool_call","speaker":"Bob","name":"look","arguments":{"target":"the very long hallway east"}}"#,
    )
    .expect("decode");
    h.runtime.handle_event(event, Instant::now()).expect("draw");

    let trace = lock_unpoisoned(&h.terminal);
    assert_eq!(trace.row_text(0), "Bob: look(target=the very long hallw...");
    let dim_body = trace.ops.iter().any(|op| {
        matches!(op, TraceOp::Text(text, style) if text.starts_with("look(") && style.dim)
    });
    assert!(dim_body);
}

#[test]
fn resize_reflows_the_transcript() {
    let mut h = harness(90, 23);
    let now = Instant::now();
    h.runtime.handle_event(message("Alice", &"x".repeat(100)), now).expect("draw");
    assert_eq!(screen(&h.terminal)[1], format!("{}{}", " ".repeat(7), "x".repeat(18)));

    // The recording grid keeps its size; only the geometry changes.
    h.runtime.handle_resize(60, 23, now).expect("resize");
    let rows = screen(&h.terminal);
    assert_eq!(rows[0], format!("Alice: {}", "x".repeat(52)));
    assert_eq!(rows[1], format!("{}{}", " ".repeat(7), "x".repeat(48)));
    assert_eq!(h.runtime.geometry(), Geometry::new(60, 23));
}

#[test]
fn long_speaker_names_leave_the_footer_intact() {
    let mut h = harness(16, 8);
    let now = Instant::now();
    h.runtime
        .handle_event(message("Bartholomew the Great", &"x".repeat(30)), now)
        .expect("draw");

    let rows = screen(&h.terminal);
    assert_eq!(rows[0], format!("Bar...: {}", "x".repeat(7)));
    for row in &rows[..5] {
        assert!(row.chars().count() <= 15, "row too wide: {row:?}");
    }
    assert!(rows[5].starts_with("─ Chat"));
    assert_eq!(rows[7], ">");
}
