//! Cancellation utilities
//!
//! First-class cancellation handles for generation streams. Consumers can
//! also simply drop the stream; the handle exists for callers that need to
//! signal cancellation from a different task than the one consuming.

use tokio_util::sync::CancellationToken;

use super::{GenerationStream, GenerationStreamHandle};

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub(crate) fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. The wrapped stream stops as soon as possible;
    /// dropping it then closes the underlying vendor connection.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Wrap a generation stream so it can be stopped through a [`CancelHandle`].
pub fn make_cancellable_stream(stream: GenerationStream) -> GenerationStreamHandle {
    let cancel = CancelHandle::new();
    let token = cancel.token.clone();
    let mut inner = stream;
    let stream = async_stream::stream! {
        use futures_util::StreamExt;
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                item = inner.next() => {
                    let Some(item) = item else { break };
                    yield item;
                }
            }
        }
    };
    GenerationStreamHandle {
        stream: Box::pin(stream),
        cancel,
    }
}
