//! Collaborator seams: the orchestrator the console submits to, the cost table it prices
//! responses with, and the pending-work signal drained at shutdown.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::runtime::event::LlmUsage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub location_id: String,
    pub user_id: String,
    pub user_name: String,
    pub text: String,
}

/// Outbound calls are fire-and-forget; results come back as events.
pub trait Orchestrator {
    fn submit_user_message(&mut self, request: SubmitRequest);

    /// Hold back polled updates until `until` so the submitted message is not raced.
    fn pause_updates_until(&mut self, until: SystemTime);
}

pub trait CostTable {
    /// `None` when the model is not priced.
    fn cost(&self, usage: &LlmUsage) -> Option<f64>;
}

/// Prices nothing; tokens still accumulate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCostTable;

impl CostTable for NoCostTable {
    fn cost(&self, _usage: &LlmUsage) -> Option<f64> {
        None
    }
}

/// One price row, in currency units per million tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub platform: String,
    pub model_prefix: String,
    pub input_per_million: f64,
    pub output_per_million: f64,
    #[serde(default)]
    pub cached_per_million: f64,
}

/// Rows matched on platform plus the longest model-name prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    pub rows: Vec<PriceRow>,
}

impl PriceTable {
    pub fn new(rows: Vec<PriceRow>) -> Self {
        Self { rows }
    }

    fn lookup(&self, usage: &LlmUsage) -> Option<&PriceRow> {
        self.rows
            .iter()
            .filter(|row| row.platform == usage.platform)
            .filter(|row| usage.model.starts_with(&row.model_prefix))
            .max_by_key(|row| row.model_prefix.len())
    }
}

impl CostTable for PriceTable {
    fn cost(&self, usage: &LlmUsage) -> Option<f64> {
        let row = self.lookup(usage)?;
        // Cached tokens are billed at the cached rate instead of the input rate.
        let cached = usage.cached_tokens.min(usage.input_tokens);
        let fresh = usage.input_tokens - cached;
        let million = 1_000_000.0;
        Some(
            fresh as f64 * row.input_per_million / million
                + cached as f64 * row.cached_per_million / million
                + usage.output_tokens as f64 * row.output_per_million / million,
        )
    }
}

/// Count of in-flight external saves, drained before exit.
pub trait PendingWork {
    fn pending_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::{CostTable, NoCostTable, PriceRow, PriceTable};
    use crate::runtime::event::LlmUsage;

    fn usage(platform: &str, model: &str) -> LlmUsage {
        LlmUsage {
            model: model.to_string(),
            input_tokens: 1_000_000,
            output_tokens: 500_000,
            cached_tokens: 0,
            platform: platform.to_string(),
        }
    }

    fn table() -> PriceTable {
        PriceTable::new(vec![
            PriceRow {
                platform: "openai".to_string(),
                model_prefix: "gpt-4o".to_string(),
                input_per_million: 2.5,
                output_per_million: 10.0,
                cached_per_million: 1.25,
            },
            PriceRow {
                platform: "openai".to_string(),
                model_prefix: "gpt-4o-mini".to_string(),
                input_per_million: 0.15,
                output_per_million: 0.6,
                cached_per_million: 0.075,
            },
        ])
    }

    #[test]
    fn longest_prefix_on_the_same_platform_wins() {
        let cost = table().cost(&usage("openai", "gpt-4o-mini-2024")).expect("priced");
        assert!((cost - 0.45).abs() < 1e-9);

        let cost = table().cost(&usage("openai", "gpt-4o-2024")).expect("priced");
        assert!((cost - 7.5).abs() < 1e-9);
    }

    #[test]
    fn cached_tokens_use_the_cached_rate() {
        let mut cached = usage("openai", "gpt-4o");
        cached.cached_tokens = 1_000_000;
        let cost = table().cost(&cached).expect("priced");
        assert!((cost - 6.25).abs() < 1e-9);
    }

    #[test]
    fn unknown_models_are_unpriced() {
        assert_eq!(table().cost(&usage("anthropic", "gpt-4o")), None);
        assert_eq!(table().cost(&usage("openai", "o1")), None);
        assert_eq!(NoCostTable.cost(&usage("openai", "gpt-4o")), None);
    }
}
