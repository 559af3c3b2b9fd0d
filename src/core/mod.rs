//! Core interfaces and types: the terminal seam, the output gate, and pure text helpers.

pub mod output;
pub mod terminal;
pub mod text;
