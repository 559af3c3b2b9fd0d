//! Streaming-delta accumulator.
//!
//! Each active speaker owns at most one handle to a transcript entry that grows in place.
//! Finalize replaces the accumulated text with the authoritative final body.

use crate::state::status::StatusModel;
use crate::state::transcript::{EntryId, EntryKind, TranscriptBuffer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHandle {
    pub speaker: String,
    pub entry: EntryId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaOutcome {
    /// A new entry was opened for this delta.
    pub opened: bool,
    /// The speaker's thinking indicator was cleared.
    pub cleared_thinking: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StreamAccumulator {
    handles: Vec<StreamHandle>,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_delta(
        &mut self,
        buffer: &mut TranscriptBuffer,
        status: &mut StatusModel,
        speaker: &str,
        fragment: &str,
    ) -> DeltaOutcome {
        let existing = self
            .handle_index(speaker)
            .map(|index| self.handles[index].entry)
            .filter(|entry| buffer.get(*entry).is_some());

        let (entry, opened) = match existing {
            Some(entry) => (entry, false),
            None => {
                // A handle whose entry was trimmed away is stale; replace it.
                self.remove(speaker);
                let entry = buffer.push(speaker, String::new(), EntryKind::Normal);
                self.handles.push(StreamHandle {
                    speaker: speaker.to_string(),
                    entry,
                });
                (entry, true)
            }
        };

        let cleared_thinking = status.clear_thinking_for(speaker);

        if let Some(target) = buffer.get_mut(entry) {
            target.body.push_str(fragment);
        }

        DeltaOutcome {
            opened,
            cleared_thinking,
        }
    }

    /// Overwrite the streamed entry with `final_body` and end the stream.
    ///
    /// Returns false when `speaker` has no live stream; the buffer is left unchanged and the
    /// caller appends the message itself.
    pub fn on_finalize(
        &mut self,
        buffer: &mut TranscriptBuffer,
        speaker: &str,
        final_body: &str,
    ) -> bool {
        let Some(handle) = self.remove(speaker) else {
            return false;
        };
        let Some(entry) = buffer.get_mut(handle.entry) else {
            return false;
        };
        entry.body = final_body.to_string();
        true
    }

    pub fn is_streaming(&self, speaker: &str) -> bool {
        self.handle_index(speaker).is_some()
    }

    pub fn handles(&self) -> &[StreamHandle] {
        &self.handles
    }

    fn handle_index(&self, speaker: &str) -> Option<usize> {
        self.handles
            .iter()
            .position(|handle| handle.speaker == speaker)
    }

    fn remove(&mut self, speaker: &str) -> Option<StreamHandle> {
        let index = self.handle_index(speaker)?;
        Some(self.handles.remove(index))
    }
}
