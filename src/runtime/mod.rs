//! Runtime: inputs, dispatch, timers, and the console loop.

pub mod coalesce;
pub mod console;
pub mod dispatch;
pub mod event;
pub mod host;
pub mod scheduler;

pub use console::ConsoleRuntime;
pub use event::{ConsoleEvent, ConsoleInput, InputKey};
pub use host::{CostTable, NoCostTable, Orchestrator, PendingWork, PriceTable, SubmitRequest};
pub use scheduler::Redraw;
