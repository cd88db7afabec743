//! Chunk-to-generation stitching.
//!
//! The stitcher is a 1:1 lazy mapping over the vendor chunk stream: no
//! buffering, no reordering, no batching. Backpressure is whatever the
//! transport provides; each `next()` suspends until the vendor delivers the
//! next chunk. The stitcher owns the vendor stream, so dropping the output
//! releases the stream-scoped resource whether or not the stream ran to
//! completion.

use std::sync::Arc;

use futures_util::StreamExt;

use crate::adapter::{ChatAdapter, ChunkStream};
use crate::error::GatewayError;

use super::GenerationStream;

/// Turn a vendor chunk stream into a normalized generation stream.
///
/// Any failure after establishment, whether a transport error yielded by the
/// chunk stream or a chunk the adapter cannot normalize, is wrapped in
/// [`GatewayError::MidStream`] and terminates the output. Generations
/// already emitted stand.
pub fn stitch<A>(chunks: ChunkStream<A::Chunk>, adapter: Arc<A>) -> GenerationStream
where
    A: ChatAdapter + 'static,
{
    let mut chunks = chunks;
    Box::pin(async_stream::stream! {
        while let Some(item) = chunks.next().await {
            match item.and_then(|chunk| adapter.normalize_chunk(chunk)) {
                Ok(generation) => yield Ok(generation),
                Err(error) => {
                    yield Err(GatewayError::MidStream(Box::new(error)));
                    return;
                }
            }
        }
    })
}
