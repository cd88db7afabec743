//! Core data model: prompts, options, and normalized results.

mod chat;
mod options;

pub use chat::*;
pub use options::*;
