use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("terminal I/O error while {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode console event: {source}")]
    EventDecode {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to open log sink at {path}: {source}")]
    LogSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    LogInit(String),
}

impl ConsoleError {
    #[must_use]
    pub fn io(operation: &'static str, source: std::io::Error) -> Self {
        Self::Io { operation, source }
    }

    #[must_use]
    pub fn log_sink(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LogSink {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
