//! Status/input line model: thinking and executing indicators, input text, usage totals.

use std::time::{Duration, Instant};

use crate::core::text::width::glyphs;

pub const INDICATOR_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, PartialEq)]
struct Thinking {
    speaker: String,
    since: Instant,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusModel {
    thinking: Option<Thinking>,
    executing: Vec<(String, String)>,
    input: String,
    total_input_tokens: u64,
    total_output_tokens: u64,
    cumulative_cost: f64,
}

impl StatusModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_thinking(&mut self, speaker: impl Into<String>, now: Instant) {
        self.thinking = Some(Thinking {
            speaker: speaker.into(),
            since: now,
        });
    }

    /// Clear the thinking indicator if it belongs to `speaker`.
    pub fn clear_thinking_for(&mut self, speaker: &str) -> bool {
        if self.thinking_speaker() == Some(speaker) {
            self.thinking = None;
            return true;
        }
        false
    }

    /// Liveness guard for a thinking indicator whose follow-up event never arrived.
    pub fn expire_thinking(&mut self, now: Instant, timeout: Duration) -> bool {
        let expired = self
            .thinking
            .as_ref()
            .is_some_and(|thinking| now.saturating_duration_since(thinking.since) >= timeout);
        if expired {
            self.thinking = None;
        }
        expired
    }

    pub fn thinking_speaker(&self) -> Option<&str> {
        self.thinking.as_ref().map(|thinking| thinking.speaker.as_str())
    }

    /// Mark `key` as occupied; a repeated key replaces its label in place.
    pub fn occupy(&mut self, key: impl Into<String>, label: impl Into<String>) {
        let key = key.into();
        let label = label.into();
        if let Some(slot) = self.executing.iter_mut().find(|(existing, _)| *existing == key) {
            slot.1 = label;
            return;
        }
        self.executing.push((key, label));
    }

    /// Remove `key`, returning its label when it was present.
    pub fn release(&mut self, key: &str) -> Option<String> {
        let index = self.executing.iter().position(|(existing, _)| existing == key)?;
        Some(self.executing.remove(index).1)
    }

    pub fn executing(&self) -> &[(String, String)] {
        &self.executing
    }

    pub fn has_indicator(&self) -> bool {
        self.thinking.is_some() || !self.executing.is_empty()
    }

    /// Indicator phrases without the animated dots, or `None` when idle.
    pub fn indicator_text(&self) -> Option<String> {
        let mut phrases = Vec::new();
        if let Some(speaker) = self.thinking_speaker() {
            phrases.push(format!("{speaker} is thinking"));
        }
        for (_, label) in &self.executing {
            phrases.push(label.clone());
        }
        if phrases.is_empty() {
            None
        } else {
            Some(phrases.join(INDICATOR_SEPARATOR))
        }
    }

    /// Accumulate usage; `cost` of `None` leaves the running cost untouched.
    pub fn record_usage(&mut self, input_tokens: u64, output_tokens: u64, cost: Option<f64>) {
        self.total_input_tokens = self.total_input_tokens.saturating_add(input_tokens);
        self.total_output_tokens = self.total_output_tokens.saturating_add(output_tokens);
        if let Some(cost) = cost {
            self.cumulative_cost += cost;
        }
    }

    pub fn total_input_tokens(&self) -> u64 {
        self.total_input_tokens
    }

    pub fn total_output_tokens(&self) -> u64 {
        self.total_output_tokens
    }

    pub fn cumulative_cost(&self) -> f64 {
        self.cumulative_cost
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_input_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn push_input_str(&mut self, text: &str) {
        self.input.push_str(text);
    }

    /// Remove the last glyph; returns false when the input was already empty.
    pub fn backspace(&mut self) -> bool {
        let Some(last) = glyphs(&self.input).next_back() else {
            return false;
        };
        let cut = self.input.len() - last.len();
        self.input.truncate(cut);
        true
    }

    pub fn clear_input(&mut self) -> bool {
        let had_input = !self.input.is_empty();
        self.input.clear();
        had_input
    }

    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::StatusModel;
    use std::time::{Duration, Instant};

    #[test]
    fn thinking_clears_only_for_matching_speaker() {
        let mut status = StatusModel::new();
        status.set_thinking("Alice", Instant::now());

        assert!(!status.clear_thinking_for("Bob"));
        assert_eq!(status.thinking_speaker(), Some("Alice"));
        assert!(status.clear_thinking_for("Alice"));
        assert_eq!(status.thinking_speaker(), None);
    }

    #[test]
    fn thinking_expires_after_timeout() {
        let start = Instant::now();
        let mut status = StatusModel::new();
        status.set_thinking("Alice", start);

        assert!(!status.expire_thinking(start + Duration::from_secs(14), Duration::from_secs(15)));
        assert!(status.expire_thinking(start + Duration::from_secs(15), Duration::from_secs(15)));
        assert!(!status.has_indicator());
    }

    #[test]
    fn executing_keys_render_as_joined_phrases() {
        let mut status = StatusModel::new();
        status.set_thinking("Alice", Instant::now());
        status.occupy("desk", "Bob is writing");
        status.occupy("stove", "Cara is cooking");

        assert_eq!(
            status.indicator_text().as_deref(),
            Some("Alice is thinking | Bob is writing | Cara is cooking")
        );

        assert_eq!(status.release("desk").as_deref(), Some("Bob is writing"));
        assert_eq!(status.release("desk"), None);
        status.clear_thinking_for("Alice");
        assert_eq!(status.indicator_text().as_deref(), Some("Cara is cooking"));
    }

    #[test]
    fn reoccupying_a_key_replaces_its_label() {
        let mut status = StatusModel::new();
        status.occupy("desk", "Bob is writing");
        status.occupy("desk", "Bob is reading");
        assert_eq!(status.executing().len(), 1);
        assert_eq!(status.executing()[0].1, "Bob is reading");
    }

    #[test]
    fn unknown_cost_still_accumulates_tokens() {
        let mut status = StatusModel::new();
        status.record_usage(100, 20, Some(0.5));
        status.record_usage(10, 5, None);

        assert_eq!(status.total_input_tokens(), 110);
        assert_eq!(status.total_output_tokens(), 25);
        assert!((status.cumulative_cost() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn backspace_removes_whole_glyphs() {
        let mut status = StatusModel::new();
        status.push_input_str("hi e\u{301}");
        assert!(status.backspace());
        assert_eq!(status.input(), "hi ");
        status.clear_input();
        assert!(!status.backspace());
    }
}
