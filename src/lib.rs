//! Rendering core for a scrolling, multi-pane chat console.
//!
//! Invariant: single output gate. Only `core::output::OutputGate::flush(..)` writes to the
//! terminal.
//!
//! # Public API Overview
//! - Feed orchestration events, key input and resizes into a [`ConsoleRuntime`], directly or
//!   through [`ConsoleRuntime::run`] over an `mpsc` channel.
//! - Draw through any [`Terminal`]; [`AnsiTerminal`] emits ANSI escapes into a writer.
//! - Use the pure layers (`core::text`, `state`, `render`) on their own for layout math.

#![allow(clippy::too_many_arguments, clippy::type_complexity)]

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
#[cfg(unix)]
pub mod platform;
pub mod render;
pub mod runtime;
pub mod state;

/// Configuration and errors.
pub use crate::config::{ConsoleConfig, Identity};
pub use crate::error::{ConsoleError, Result};

/// Terminal interfaces and the ANSI reference implementation.
pub use crate::core::output::{AnsiTerminal, OutputGate, TerminalCmd};
pub use crate::core::terminal::{Color, Style, Terminal};

/// Width, markup and wrapping helpers.
pub use crate::core::text::markup::{parse, StyledSegment};
pub use crate::core::text::width::{UnicodeWidth, WidthOracle};
pub use crate::core::text::wrap::wrap;

/// Render-layer frame types.
pub use crate::render::{Frame, Geometry, Line, Span};

/// Runtime, inputs and collaborator seams.
pub use crate::runtime::{
    ConsoleEvent, ConsoleInput, ConsoleRuntime, CostTable, InputKey, NoCostTable, Orchestrator,
    PendingWork, PriceTable, Redraw, SubmitRequest,
};

/// Console state.
pub use crate::state::view::{NavKey, PaneKind, PaneState};
pub use crate::state::ConsoleState;
