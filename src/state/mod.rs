//! Console state: everything a redraw reads, owned in one place and mutated only by the
//! dispatch handlers.

pub mod documents;
pub mod inspector;
pub mod status;
pub mod stream;
pub mod transcript;
pub mod view;

use crate::state::documents::DocumentSet;
use crate::state::inspector::InspectorSet;
use crate::state::status::StatusModel;
use crate::state::stream::StreamAccumulator;
use crate::state::transcript::TranscriptBuffer;
use crate::state::view::ViewState;

#[derive(Debug, Clone)]
pub struct ConsoleState {
    pub transcript: TranscriptBuffer,
    pub stream: StreamAccumulator,
    pub status: StatusModel,
    pub view: ViewState,
    pub documents: DocumentSet,
    pub inspector: InspectorSet,
}

impl ConsoleState {
    pub fn new(transcript_capacity: usize) -> Self {
        Self {
            transcript: TranscriptBuffer::new(transcript_capacity),
            stream: StreamAccumulator::new(),
            status: StatusModel::new(),
            view: ViewState::new(),
            documents: DocumentSet::new(),
            inspector: InspectorSet::new(),
        }
    }
}
