//! Inputs to the console runtime: orchestration events, key input, resize, shutdown.
//!
//! Events are tagged JSON objects, e.g. `{"event":"stream_delta","speaker":"Alice","fragment":"hi"}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConsoleError, Result};
use crate::state::inspector::InspectorRecord;
use crate::state::transcript::EntryKind;
use crate::state::view::NavKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ConsoleEvent {
    MissionSet {
        text: String,
        #[serde(default)]
        objectives: Vec<String>,
    },
    ObjectiveCompleted {
        /// Zero-based.
        index: usize,
        objective: String,
    },
    MessageAdded {
        speaker: String,
        body: String,
        #[serde(default)]
        is_user: bool,
    },
    AgentStartedActing {
        speaker: String,
    },
    AgentFinishedActing {
        speaker: String,
    },
    ToolCall {
        speaker: String,
        name: String,
        #[serde(default)]
        arguments: Map<String, Value>,
    },
    StreamDelta {
        speaker: String,
        fragment: String,
    },
    ResourceOccupied {
        key: String,
        label: String,
    },
    ResourceReleased {
        key: String,
    },
    ResourceFailed {
        key: String,
        message: String,
    },
    DocumentUpdated {
        key: String,
        text: String,
    },
    MemoryUpdated {
        owner_id: String,
        index: usize,
        text: String,
    },
    EntityMemoryUpdated {
        owner_id: String,
        target: String,
        index: usize,
        text: String,
    },
    AgentDocumentUpdated {
        owner_id: String,
        name: String,
        text: String,
    },
    LlmResponse(LlmUsage),
    Loaded(LoadSnapshot),
    ExternalFailure {
        operation: String,
        message: String,
    },
}

impl ConsoleEvent {
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|source| ConsoleError::EventDecode { source })
    }

    /// Wire name of the event, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissionSet { .. } => "mission_set",
            Self::ObjectiveCompleted { .. } => "objective_completed",
            Self::MessageAdded { .. } => "message_added",
            Self::AgentStartedActing { .. } => "agent_started_acting",
            Self::AgentFinishedActing { .. } => "agent_finished_acting",
            Self::ToolCall { .. } => "tool_call",
            Self::StreamDelta { .. } => "stream_delta",
            Self::ResourceOccupied { .. } => "resource_occupied",
            Self::ResourceReleased { .. } => "resource_released",
            Self::ResourceFailed { .. } => "resource_failed",
            Self::DocumentUpdated { .. } => "document_updated",
            Self::MemoryUpdated { .. } => "memory_updated",
            Self::EntityMemoryUpdated { .. } => "entity_memory_updated",
            Self::AgentDocumentUpdated { .. } => "agent_document_updated",
            Self::LlmResponse(_) => "llm_response",
            Self::Loaded(_) => "loaded",
            Self::ExternalFailure { .. } => "external_failure",
        }
    }
}

/// Model-response descriptor forwarded to the cost table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmUsage {
    pub model: String,
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cached_tokens: u64,
    #[serde(default)]
    pub platform: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedEntry {
    pub speaker: String,
    pub body: String,
    #[serde(default)]
    pub kind: EntryKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedDocument {
    pub name: String,
    pub text: String,
}

/// Persisted state supplied once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSnapshot {
    #[serde(default)]
    pub transcript: Vec<LoadedEntry>,
    #[serde(default)]
    pub documents: Vec<LoadedDocument>,
    #[serde(default)]
    pub agents: Vec<InspectorRecord>,
}

/// Decoded key input. Raw byte decoding belongs to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Char(char),
    Backspace,
    /// Erase the whole input line (Ctrl-U).
    ClearInput,
    Enter,
    Nav(NavKey),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Event(ConsoleEvent),
    Key(InputKey),
    Resize { columns: u16, rows: u16 },
    Shutdown,
}
