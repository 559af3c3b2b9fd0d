//! Environment configuration.

use std::env;
use std::time::Duration;

pub const DEFAULT_TRANSCRIPT_CAPACITY: usize = 100;
pub const DEFAULT_REDRAW_INTERVAL_MS: u64 = 50;
pub const DEFAULT_STATUS_TICK_MS: u64 = 500;
pub const DEFAULT_THINKING_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_PAUSE_AFTER_SUBMIT_MS: u64 = 3_000;
pub const DEFAULT_SHUTDOWN_POLL_MS: u64 = 50;
pub const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_USER_NAME: &str = "You";

/// Who the console submits messages as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub location_id: String,
    pub user_id: String,
    pub user_name: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            location_id: String::new(),
            user_id: String::new(),
            user_name: DEFAULT_USER_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub transcript_capacity: usize,
    pub redraw_interval: Duration,
    pub status_tick: Duration,
    /// `None` keeps a thinking indicator until an explicit clearing event.
    pub thinking_timeout: Option<Duration>,
    pub pause_after_submit: Duration,
    pub shutdown_poll: Duration,
    pub shutdown_timeout: Duration,
    pub identity: Identity,
    pub log_path: Option<String>,
    pub log_filter: Option<String>,
    pub debug: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            transcript_capacity: DEFAULT_TRANSCRIPT_CAPACITY,
            redraw_interval: Duration::from_millis(DEFAULT_REDRAW_INTERVAL_MS),
            status_tick: Duration::from_millis(DEFAULT_STATUS_TICK_MS),
            thinking_timeout: Some(Duration::from_millis(DEFAULT_THINKING_TIMEOUT_MS)),
            pause_after_submit: Duration::from_millis(DEFAULT_PAUSE_AFTER_SUBMIT_MS),
            shutdown_poll: Duration::from_millis(DEFAULT_SHUTDOWN_POLL_MS),
            shutdown_timeout: Duration::from_millis(DEFAULT_SHUTDOWN_TIMEOUT_MS),
            identity: Identity::default(),
            log_path: None,
            log_filter: None,
            debug: false,
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        let thinking_timeout_ms =
            env_u64("CHAT_CONSOLE_THINKING_TIMEOUT_MS").unwrap_or(DEFAULT_THINKING_TIMEOUT_MS);

        Self {
            transcript_capacity: env_u64("CHAT_CONSOLE_TRANSCRIPT_CAPACITY")
                .map(|value| value as usize)
                .filter(|value| *value > 0)
                .unwrap_or(DEFAULT_TRANSCRIPT_CAPACITY),
            redraw_interval: env_millis("CHAT_CONSOLE_REDRAW_INTERVAL_MS", DEFAULT_REDRAW_INTERVAL_MS),
            status_tick: env_millis("CHAT_CONSOLE_STATUS_TICK_MS", DEFAULT_STATUS_TICK_MS),
            thinking_timeout: (thinking_timeout_ms > 0)
                .then(|| Duration::from_millis(thinking_timeout_ms)),
            pause_after_submit: env_millis(
                "CHAT_CONSOLE_PAUSE_AFTER_SUBMIT_MS",
                DEFAULT_PAUSE_AFTER_SUBMIT_MS,
            ),
            shutdown_poll: env_millis("CHAT_CONSOLE_SHUTDOWN_POLL_MS", DEFAULT_SHUTDOWN_POLL_MS),
            shutdown_timeout: env_millis(
                "CHAT_CONSOLE_SHUTDOWN_TIMEOUT_MS",
                DEFAULT_SHUTDOWN_TIMEOUT_MS,
            ),
            identity: Identity {
                location_id: env_string_opt("CHAT_CONSOLE_LOCATION_ID").unwrap_or_default(),
                user_id: env_string_opt("CHAT_CONSOLE_USER_ID").unwrap_or_default(),
                user_name: env_string_opt("CHAT_CONSOLE_USER_NAME")
                    .unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            },
            log_path: env_string_opt("CHAT_CONSOLE_LOG"),
            log_filter: env_string_opt("CHAT_CONSOLE_LOG_FILTER"),
            debug: env_flag("CHAT_CONSOLE_DEBUG"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_u64(key: &str) -> Option<u64> {
    env_string_opt(key).and_then(|value| value.trim().parse().ok())
}

fn env_millis(key: &str, default_ms: u64) -> Duration {
    Duration::from_millis(
        env_u64(key)
            .filter(|value| *value > 0)
            .unwrap_or(default_ms),
    )
}
