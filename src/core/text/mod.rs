//! Text helpers (markup parsing, width calculations, wrapping, truncation).
//!
//! These helpers are pure (string in/string out) and live under `core` so state and render code
//! can depend on them without importing anything from the runtime.

pub mod markup;
pub mod utils;
pub mod width;
pub mod wrap;
