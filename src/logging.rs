//! Log sink setup.
//!
//! The screen owns stdout, so log output only goes to the file named by
//! `CHAT_CONSOLE_LOG`. Without a sink configured, `tracing` macros stay no-ops.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};

const DEBUG_FILTER: &str = "chat_console=debug";
const DEFAULT_FILTER: &str = "warn";

pub fn filter_directive(config: &ConsoleConfig) -> String {
    if let Some(filter) = config.log_filter.as_deref() {
        return filter.to_string();
    }
    if config.debug {
        DEBUG_FILTER.to_string()
    } else {
        DEFAULT_FILTER.to_string()
    }
}

/// Install the global subscriber. Returns `Ok(false)` when no log sink is configured.
pub fn init_logging(config: &ConsoleConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ConsoleError::log_sink(path, source))?;

    let filter = EnvFilter::try_new(filter_directive(config))
        .map_err(|err| ConsoleError::LogInit(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| ConsoleError::LogInit(err.to_string()))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{filter_directive, init_logging};
    use crate::config::ConsoleConfig;

    #[test]
    fn filter_prefers_explicit_directive() {
        let config = ConsoleConfig {
            log_filter: Some("chat_console::runtime=trace".to_string()),
            debug: true,
            ..ConsoleConfig::default()
        };
        assert_eq!(filter_directive(&config), "chat_console::runtime=trace");
    }

    #[test]
    fn debug_flag_raises_crate_level() {
        let config = ConsoleConfig {
            debug: true,
            ..ConsoleConfig::default()
        };
        assert_eq!(filter_directive(&config), "chat_console=debug");
        assert_eq!(filter_directive(&ConsoleConfig::default()), "warn");
    }

    #[test]
    fn no_sink_means_no_subscriber() {
        let installed = init_logging(&ConsoleConfig::default()).expect("no-op init");
        assert!(!installed);
    }
}
