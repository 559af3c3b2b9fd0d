//! Platform-specific terminal integrations.

pub mod signals;

pub use signals::{stdout_size, stdout_terminal, terminal_size, SignalForwarder};
