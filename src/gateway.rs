//! Gateway Facade
//!
//! `ChatGateway` combines the per-vendor adapter pair, the vendor client and
//! the retry executor into the two public call shapes: a synchronous-style
//! `call` and a streaming `stream`. One gateway instance holds exactly one
//! client and one immutable default option set; instances are safe for
//! concurrent use because every piece of per-call state is call-local.
//! Configuration changes mean constructing a new gateway, never mutating a
//! shared one.

use std::sync::Arc;

use crate::adapter::{ChatAdapter, VendorChatClient};
use crate::error::GatewayError;
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::streaming::{self, GenerationStream, GenerationStreamHandle};
use crate::types::{ChatOptions, ChatResponse, Prompt};

/// Vendor-agnostic chat-completion gateway.
///
/// `A` supplies the payload translation for one vendor dialect, `C` moves
/// those payloads over the wire. The two are tied together through their
/// associated request/response/chunk types.
pub struct ChatGateway<A, C> {
    adapter: Arc<A>,
    client: C,
    defaults: ChatOptions,
    retry: RetryExecutor,
}

impl<A, C> ChatGateway<A, C>
where
    A: ChatAdapter + 'static,
    C: VendorChatClient<Request = A::Request, Response = A::Response, Chunk = A::Chunk>,
{
    /// Create a gateway with empty instance defaults and the default retry
    /// policy.
    pub fn new(adapter: A, client: C) -> Self {
        Self {
            adapter: Arc::new(adapter),
            client,
            defaults: ChatOptions::default(),
            retry: RetryExecutor::default(),
        }
    }

    /// Replace the instance default options.
    pub fn with_default_options(mut self, defaults: ChatOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = RetryExecutor::new(policy);
        self
    }

    /// Immutable snapshot of the instance defaults. Mutating the returned
    /// value has no effect on the gateway.
    pub fn default_options(&self) -> ChatOptions {
        self.defaults.clone()
    }

    /// Resolve the effective options for one call.
    ///
    /// Layering, lowest precedence first: adapter built-in defaults, then
    /// instance defaults, then prompt-level options. A prompt options object
    /// that does not expose the chat-options capability fails the call here,
    /// before any vendor request is built.
    fn effective_options(&self, prompt: &Prompt) -> Result<ChatOptions, GatewayError> {
        let mut options = self.adapter.base_options().merge(&self.defaults);
        if let Some(runtime) = prompt.options() {
            let overrides =
                runtime
                    .as_chat_options()
                    .ok_or_else(|| GatewayError::InvalidOptionsType {
                        type_name: runtime.type_name(),
                    })?;
            options = options.merge(&overrides);
        }
        Ok(options)
    }

    /// One non-streaming chat completion: translate, invoke under retry,
    /// normalize.
    pub async fn call(&self, prompt: &Prompt) -> Result<ChatResponse, GatewayError> {
        let options = self.effective_options(prompt)?;
        let request = self.adapter.translate(prompt.messages(), &options, false)?;

        tracing::debug!(messages = prompt.messages().len(), "invoking chat completion");
        let response = self.retry.execute(|| self.client.invoke(&request)).await?;

        self.adapter.normalize(response)
    }

    /// One streaming chat completion: translate, establish the chunk stream
    /// under retry, stitch.
    ///
    /// Retry covers establishment only. A failure after the stream has begun
    /// surfaces to the consumer as [`GatewayError::MidStream`] and is never
    /// re-attempted: generations already delivered cannot be un-sent.
    pub async fn stream(&self, prompt: &Prompt) -> Result<GenerationStream, GatewayError> {
        let options = self.effective_options(prompt)?;
        let request = self.adapter.translate(prompt.messages(), &options, true)?;

        tracing::debug!(messages = prompt.messages().len(), "establishing chat stream");
        let chunks = self
            .retry
            .execute(|| self.client.invoke_stream(&request))
            .await
            .map_err(|error| GatewayError::StreamEstablishment(Box::new(error)))?;

        Ok(streaming::stitch(chunks, Arc::clone(&self.adapter)))
    }

    /// Like [`stream`](Self::stream), with a first-class cancellation handle.
    pub async fn stream_with_cancel(
        &self,
        prompt: &Prompt,
    ) -> Result<GenerationStreamHandle, GatewayError> {
        let stream = self.stream(prompt).await?;
        Ok(streaming::make_cancellable_stream(stream))
    }
}
