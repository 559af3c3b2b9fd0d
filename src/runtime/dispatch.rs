//! Event and key handlers.
//!
//! Every handler mutates an explicit [`ConsoleState`] and returns the redraws it needs; none of
//! them draws or talks to a collaborator. The runtime applies the results.

use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::core::text::width::WidthOracle;
use crate::render::layout::Geometry;
use crate::render::pane::active_bounds;
use crate::runtime::event::{ConsoleEvent, InputKey, LlmUsage, LoadSnapshot};
use crate::runtime::host::CostTable;
use crate::runtime::scheduler::Redraw;
use crate::state::transcript::{EntryKind, SYSTEM_SPEAKER};
use crate::state::view::PaneKind;
use crate::state::ConsoleState;

pub struct DispatchContext<'a> {
    pub now: Instant,
    pub costs: &'a dyn CostTable,
}

pub fn dispatch(
    state: &mut ConsoleState,
    event: ConsoleEvent,
    ctx: &DispatchContext<'_>,
) -> Vec<Redraw> {
    debug!(event = event.kind(), "dispatch");
    match event {
        ConsoleEvent::MissionSet { text, objectives } => on_mission_set(state, &text, &objectives),
        ConsoleEvent::ObjectiveCompleted { index, objective } => {
            let body = format!("Objective {} completed: {objective}", index + 1);
            state.transcript.push(SYSTEM_SPEAKER, body, EntryKind::Action);
            vec![Redraw::Full]
        }
        ConsoleEvent::MessageAdded {
            speaker,
            body,
            is_user,
        } => on_message_added(state, &speaker, &body, is_user),
        ConsoleEvent::AgentStartedActing { speaker } => {
            state.status.set_thinking(speaker, ctx.now);
            vec![Redraw::Status]
        }
        ConsoleEvent::AgentFinishedActing { speaker } => {
            if state.status.clear_thinking_for(&speaker) {
                vec![Redraw::Status]
            } else {
                Vec::new()
            }
        }
        ConsoleEvent::ToolCall {
            speaker,
            name,
            arguments,
        } => {
            state
                .transcript
                .push(speaker, tool_call_summary(&name, &arguments), EntryKind::Action);
            vec![Redraw::Full]
        }
        ConsoleEvent::StreamDelta { speaker, fragment } => {
            let outcome =
                state
                    .stream
                    .on_delta(&mut state.transcript, &mut state.status, &speaker, &fragment);
            let mut redraws = vec![Redraw::Content];
            if outcome.cleared_thinking {
                redraws.push(Redraw::Status);
            }
            redraws
        }
        ConsoleEvent::ResourceOccupied { key, label } => {
            state.status.occupy(key, label);
            vec![Redraw::Status]
        }
        ConsoleEvent::ResourceReleased { key } => {
            if state.status.release(&key).is_some() {
                vec![Redraw::Status]
            } else {
                Vec::new()
            }
        }
        ConsoleEvent::ResourceFailed { key, message } => {
            let label = state.status.release(&key).unwrap_or(key);
            warn!(resource = %label, %message, "resource failed");
            state.transcript.push_system(format!("{label} failed: {message}"));
            vec![Redraw::Full]
        }
        ConsoleEvent::DocumentUpdated { key, text } => {
            state.documents.upsert(key, text);
            redraw_if_active(state, PaneKind::Document)
        }
        ConsoleEvent::MemoryUpdated {
            owner_id,
            index,
            text,
        } => {
            let patched = state.inspector.patch_memory(&owner_id, index, &text);
            inspector_patched(state, patched, &owner_id)
        }
        ConsoleEvent::EntityMemoryUpdated {
            owner_id,
            target,
            index,
            text,
        } => {
            let patched = state
                .inspector
                .patch_entity_memory(&owner_id, &target, index, &text);
            inspector_patched(state, patched, &owner_id)
        }
        ConsoleEvent::AgentDocumentUpdated {
            owner_id,
            name,
            text,
        } => {
            let patched = state.inspector.patch_document(&owner_id, &name, &text);
            inspector_patched(state, patched, &owner_id)
        }
        ConsoleEvent::LlmResponse(usage) => on_llm_response(state, &usage, ctx.costs),
        ConsoleEvent::Loaded(snapshot) => on_loaded(state, snapshot),
        ConsoleEvent::ExternalFailure { operation, message } => {
            warn!(%operation, %message, "external call failed");
            state
                .transcript
                .push_system(format!("{operation} failed: {message}"));
            vec![Redraw::Full]
        }
    }
}

fn on_mission_set(state: &mut ConsoleState, text: &str, objectives: &[String]) -> Vec<Redraw> {
    let mut body = format!("Mission: {text}");
    for (index, objective) in objectives.iter().enumerate() {
        body.push_str(&format!("\n  {}. {objective}", index + 1));
    }
    state.transcript.push_system(body);
    vec![Redraw::Full]
}

fn on_message_added(
    state: &mut ConsoleState,
    speaker: &str,
    body: &str,
    is_user: bool,
) -> Vec<Redraw> {
    state.status.clear_thinking_for(speaker);

    if state
        .stream
        .on_finalize(&mut state.transcript, speaker, body)
    {
        debug!(%speaker, "stream finalized");
        return vec![Redraw::Content, Redraw::Status];
    }

    debug!(%speaker, is_user, "message appended");
    state.transcript.push(speaker, body, EntryKind::Normal);
    vec![Redraw::Full]
}

/// `look(target=door, careful=true)`; string arguments are shown unquoted.
pub fn tool_call_summary(name: &str, arguments: &Map<String, Value>) -> String {
    let args: Vec<String> = arguments
        .iter()
        .map(|(key, value)| match value {
            Value::String(text) => format!("{key}={text}"),
            other => format!("{key}={other}"),
        })
        .collect();
    format!("{name}({})", args.join(", "))
}

fn redraw_if_active(state: &ConsoleState, pane: PaneKind) -> Vec<Redraw> {
    if state.view.active() == pane {
        vec![Redraw::Content]
    } else {
        Vec::new()
    }
}

fn inspector_patched(state: &ConsoleState, patched: bool, owner_id: &str) -> Vec<Redraw> {
    if !patched {
        debug!(%owner_id, "ignoring patch for unknown inspector record");
        return Vec::new();
    }
    redraw_if_active(state, PaneKind::Inspector)
}

fn on_llm_response(
    state: &mut ConsoleState,
    usage: &LlmUsage,
    costs: &dyn CostTable,
) -> Vec<Redraw> {
    let cost = costs.cost(usage);
    if cost.is_none() {
        debug!(model = %usage.model, platform = %usage.platform, "no price for model");
    }
    state
        .status
        .record_usage(usage.input_tokens, usage.output_tokens, cost);
    vec![Redraw::Status]
}

fn on_loaded(state: &mut ConsoleState, snapshot: LoadSnapshot) -> Vec<Redraw> {
    let LoadSnapshot {
        transcript,
        documents,
        agents,
    } = snapshot;

    // Only the newest `capacity` entries can survive anyway.
    let skip = transcript.len().saturating_sub(state.transcript.capacity());
    for entry in transcript.into_iter().skip(skip) {
        state.transcript.push(entry.speaker, entry.body, entry.kind);
    }
    for document in documents {
        state.documents.upsert(document.name, document.text);
    }
    state.inspector.replace_all(agents);
    vec![Redraw::Full]
}

/// Result of one key press.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    pub redraws: Vec<Redraw>,
    /// Trimmed text to submit.
    pub submit: Option<String>,
    pub quit: bool,
}

impl KeyOutcome {
    fn redraw(redraw: Redraw) -> Self {
        Self {
            redraws: vec![redraw],
            ..Self::default()
        }
    }
}

pub fn handle_key(
    state: &mut ConsoleState,
    key: InputKey,
    geometry: Geometry,
    oracle: &dyn WidthOracle,
) -> KeyOutcome {
    match key {
        InputKey::Char(ch) if !ch.is_control() => {
            state.status.push_input_char(ch);
            KeyOutcome::redraw(Redraw::Input)
        }
        InputKey::Char(_) => KeyOutcome::default(),
        InputKey::Backspace => {
            if state.status.backspace() {
                KeyOutcome::redraw(Redraw::Input)
            } else {
                KeyOutcome::default()
            }
        }
        InputKey::ClearInput => {
            if state.status.clear_input() {
                KeyOutcome::redraw(Redraw::Input)
            } else {
                KeyOutcome::default()
            }
        }
        InputKey::Enter => {
            let raw = state.status.take_input();
            let text = raw.trim();
            let mut outcome = if raw.is_empty() {
                KeyOutcome::default()
            } else {
                KeyOutcome::redraw(Redraw::Input)
            };
            if !text.is_empty() {
                outcome.submit = Some(text.to_string());
            }
            outcome
        }
        InputKey::Nav(nav) => {
            let bounds = active_bounds(state, geometry, oracle);
            let change = state.view.apply(nav, bounds);
            if change.pane_switched {
                debug!(pane = state.view.active().label(), "pane switched");
                KeyOutcome::redraw(Redraw::Full)
            } else if change.cursor_moved {
                KeyOutcome::redraw(Redraw::Content)
            } else {
                KeyOutcome::default()
            }
        }
        InputKey::Quit => KeyOutcome {
            quit: true,
            ..KeyOutcome::default()
        },
    }
}
