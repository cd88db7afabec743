//! Modelgate: a vendor-agnostic streaming chat-completion gateway.
//!
//! The crate separates three concerns:
//!
//! - **Adapters** ([`ChatAdapter`]) translate between the generic chat data
//!   model and one vendor's payload dialect.
//! - **Clients** ([`VendorChatClient`]) move vendor payloads over the wire.
//! - **The gateway** ([`ChatGateway`]) layers call options, runs transient
//!   errors through a retry executor, and stitches vendor chunk streams into
//!   normalized generation streams.
//!
//! # Example
//!
//! ```no_run
//! use modelgate::prelude::*;
//! use modelgate::providers::cohere::CohereAdapter;
//! # use modelgate::adapter::ChunkStream;
//! # use modelgate::providers::cohere::{CohereChatRequest, CohereChatResponse, CohereChatChunk};
//! # struct MyClient;
//! # #[async_trait::async_trait]
//! # impl VendorChatClient for MyClient {
//! #     type Request = CohereChatRequest;
//! #     type Response = CohereChatResponse;
//! #     type Chunk = CohereChatChunk;
//! #     async fn invoke(&self, _: &Self::Request) -> Result<Self::Response, GatewayError> { unimplemented!() }
//! #     async fn invoke_stream(&self, _: &Self::Request) -> Result<ChunkStream<Self::Chunk>, GatewayError> { unimplemented!() }
//! # }
//!
//! # async fn run() -> Result<(), GatewayError> {
//! let gateway = ChatGateway::new(CohereAdapter::new(), MyClient)
//!     .with_default_options(ChatOptions::new().with_temperature(0.3));
//!
//! let response = gateway.call(&Prompt::from_text("Why is the sky blue?")).await?;
//! println!("{}", response.first_text().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod adapter;
pub mod error;
pub mod gateway;
pub mod providers;
pub mod retry;
pub mod streaming;
pub mod types;

pub use adapter::{ChatAdapter, ChunkStream, VendorChatClient};
pub use error::GatewayError;
pub use gateway::ChatGateway;
pub use retry::{RetryExecutor, RetryPolicy};
pub use streaming::{CancelHandle, GenerationStream, GenerationStreamHandle};
pub use types::{
    ChatMessage, ChatOptions, ChatResponse, Generation, GenerationMetadata, MessageRole,
    ModelOptions, Prompt, Truncate, Usage,
};

/// One-line import for the common surface.
pub mod prelude {
    pub use crate::adapter::{ChatAdapter, VendorChatClient};
    pub use crate::error::GatewayError;
    pub use crate::gateway::ChatGateway;
    pub use crate::retry::RetryPolicy;
    pub use crate::types::{
        ChatMessage, ChatOptions, ChatResponse, Generation, Prompt, Usage,
    };
}
