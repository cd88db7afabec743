//! Streaming Module
//!
//! Normalized streaming output and the machinery that produces it:
//! - stream type aliases and the cancellable stream handle
//! - the chunk-to-generation stitcher
//! - first-class cancellation

mod cancel;
mod stitcher;
mod types;

pub use cancel::*;
pub use stitcher::*;
pub use types::*;
