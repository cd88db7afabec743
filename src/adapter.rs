//! Vendor seam: adapter and client traits.
//!
//! Each vendor contributes exactly two things: a [`ChatAdapter`] that maps
//! between the generic data model and the vendor's payload shapes, and a
//! [`VendorChatClient`] that moves those payloads over the wire. The gateway
//! is generic over the pair and contains no vendor-specific logic.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

use crate::error::GatewayError;
use crate::types::{ChatMessage, ChatOptions, ChatResponse, Generation};

/// A lazy, finite, non-restartable sequence of vendor chunks.
///
/// Produced by [`VendorChatClient::invoke_stream`]; dropping it must release
/// the underlying network resource.
pub type ChunkStream<C> = Pin<Box<dyn Stream<Item = Result<C, GatewayError>> + Send>>;

/// Translator/normalizer pair for one vendor payload dialect.
///
/// Implementations are stateless values; all per-call state lives in the
/// request and response objects flowing through them.
pub trait ChatAdapter: Send + Sync {
    /// Vendor request payload
    type Request: Send + Sync;
    /// Vendor non-streaming response payload
    type Response: Send;
    /// Vendor streaming chunk payload
    type Chunk: Send + 'static;

    /// Build the vendor request from the message list and the already-merged
    /// effective options. `stream` tells vendors whose request payload
    /// carries a streaming flag which call kind this is.
    ///
    /// Options the vendor payload cannot represent must not be dropped
    /// silently: either map them or document the omission on the adapter.
    fn translate(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
        stream: bool,
    ) -> Result<Self::Request, GatewayError>;

    /// Map a non-streaming vendor response to the normalized form, one
    /// [`Generation`] per alternative, order preserved.
    fn normalize(&self, response: Self::Response) -> Result<ChatResponse, GatewayError>;

    /// Map one streaming chunk to one [`Generation`].
    ///
    /// Content chunks yield text without metadata; the terminal chunk yields
    /// metadata with usage. When a chunk carries both an explicit
    /// invocation-metrics object and separate token-count fields, the
    /// invocation-metrics object takes precedence.
    fn normalize_chunk(&self, chunk: Self::Chunk) -> Result<Generation, GatewayError>;

    /// Vendor built-in hard defaults, the bottom layer of the option
    /// override chain.
    fn base_options(&self) -> ChatOptions {
        ChatOptions::default()
    }
}

/// Opaque vendor SDK client capability.
///
/// Implementations own transport, signing, and region concerns; the gateway
/// only requires that they are stateless per call and safe to share.
#[async_trait]
pub trait VendorChatClient: Send + Sync {
    /// Vendor request payload
    type Request: Send + Sync;
    /// Vendor non-streaming response payload
    type Response: Send;
    /// Vendor streaming chunk payload
    type Chunk: Send + 'static;

    /// One non-streaming round trip.
    async fn invoke(&self, request: &Self::Request) -> Result<Self::Response, GatewayError>;

    /// Establish one chunk stream. Errors returned here count as
    /// establishment failures and are eligible for retry; errors yielded by
    /// the stream itself are mid-stream failures and are not.
    async fn invoke_stream(
        &self,
        request: &Self::Request,
    ) -> Result<ChunkStream<Self::Chunk>, GatewayError>;
}

#[async_trait]
impl<T: VendorChatClient + ?Sized> VendorChatClient for std::sync::Arc<T> {
    type Request = T::Request;
    type Response = T::Response;
    type Chunk = T::Chunk;

    async fn invoke(&self, request: &Self::Request) -> Result<Self::Response, GatewayError> {
        (**self).invoke(request).await
    }

    async fn invoke_stream(
        &self,
        request: &Self::Request,
    ) -> Result<ChunkStream<Self::Chunk>, GatewayError> {
        (**self).invoke_stream(request).await
    }
}
