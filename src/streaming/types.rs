//! Core streaming types

use futures::Stream;
use std::pin::Pin;

use crate::error::GatewayError;
use crate::types::Generation;

/// Normalized streaming output: one [`Generation`] per vendor chunk, in
/// vendor emission order.
///
/// Dropping the stream before it completes releases the underlying vendor
/// subscription; no further items are produced.
pub type GenerationStream = Pin<Box<dyn Stream<Item = Result<Generation, GatewayError>> + Send>>;

/// A generation stream paired with a first-class cancellation handle.
///
/// Cancelling stops the stream as soon as possible; the dropped inner stream
/// then closes the vendor connection so the provider stops generating.
pub struct GenerationStreamHandle {
    /// The underlying generation stream
    pub stream: GenerationStream,
    /// Handle to cancel the stream
    pub cancel: super::CancelHandle,
}
