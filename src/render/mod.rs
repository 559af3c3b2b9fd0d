//! Rendering pipeline: pure functions from state and `Geometry` to lines, then to terminal
//! commands.

pub mod frame;
pub mod layout;
pub mod pane;
pub mod renderer;
pub mod status;
pub mod transcript;

pub use frame::{CursorPos, Frame, Line, Span};
pub use layout::Geometry;
pub use renderer::ScreenRenderer;
