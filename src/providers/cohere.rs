//! Cohere Command text-completion dialect.
//!
//! The richest of the three reference dialects: it can represent every
//! generic chat option, including multiple generations, logit bias and the
//! truncation policy, plus the vendor-specific `return_likelihoods` knob
//! (configured on the adapter, not part of the generic options).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::adapter::ChatAdapter;
use crate::error::GatewayError;
use crate::types::{
    ChatMessage, ChatOptions, ChatResponse, Generation, GenerationMetadata, Truncate,
};

use super::{InvocationMetrics, PromptFormatter};

/// Token likelihood reporting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReturnLikelihoods {
    /// Do not return likelihoods
    None,
    /// Likelihoods for generated tokens only
    Generation,
    /// Likelihoods for prompt and generated tokens
    All,
}

/// Cohere completion request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohereChatRequest {
    /// Rendered prompt string
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(rename = "p", skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(rename = "k", skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_likelihoods: Option<ReturnLikelihoods>,
    /// Whether the vendor should stream partial results
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_generations: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<HashMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncate: Option<Truncate>,
}

/// One generated alternative in a non-streaming response.
#[derive(Debug, Clone, Deserialize)]
pub struct CohereGeneration {
    pub id: Option<String>,
    pub text: String,
    pub finish_reason: Option<String>,
}

/// Cohere non-streaming response payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CohereChatResponse {
    pub id: Option<String>,
    pub prompt: Option<String>,
    pub generations: Vec<CohereGeneration>,
}

/// One streaming chunk. The finished chunk carries no text and, on the
/// hosting service, the invocation metrics.
#[derive(Debug, Clone, Deserialize)]
pub struct CohereChatChunk {
    #[serde(default)]
    pub text: Option<String>,
    pub is_finished: bool,
    pub finish_reason: Option<String>,
    #[serde(rename = "amazon-bedrock-invocationMetrics")]
    pub invocation_metrics: Option<InvocationMetrics>,
}

/// Adapter for the Cohere Command dialect.
#[derive(Debug, Clone, Default)]
pub struct CohereAdapter {
    return_likelihoods: Option<ReturnLikelihoods>,
}

impl CohereAdapter {
    /// Adapter with no likelihood reporting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request token likelihoods alongside generations.
    pub const fn with_return_likelihoods(mut self, mode: ReturnLikelihoods) -> Self {
        self.return_likelihoods = Some(mode);
        self
    }
}

impl ChatAdapter for CohereAdapter {
    type Request = CohereChatRequest;
    type Response = CohereChatResponse;
    type Chunk = CohereChatChunk;

    fn translate(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
        stream: bool,
    ) -> Result<CohereChatRequest, GatewayError> {
        Ok(CohereChatRequest {
            prompt: PromptFormatter::turns().format(messages),
            temperature: options.temperature,
            top_p: options.top_p,
            top_k: options.top_k,
            max_tokens: options.max_tokens,
            stop_sequences: options.stop_sequences.clone(),
            return_likelihoods: self.return_likelihoods,
            stream,
            num_generations: options.num_generations,
            logit_bias: options.logit_bias.clone(),
            truncate: options.truncate,
        })
    }

    fn normalize(&self, response: CohereChatResponse) -> Result<ChatResponse, GatewayError> {
        let generations = response
            .generations
            .into_iter()
            .map(|g| {
                let mut generation = Generation::new(g.text);
                if let Some(reason) = g.finish_reason {
                    generation = generation.with_metadata(GenerationMetadata::new(reason, None));
                }
                generation
            })
            .collect();
        Ok(ChatResponse::new(generations))
    }

    fn normalize_chunk(&self, chunk: CohereChatChunk) -> Result<Generation, GatewayError> {
        if chunk.is_finished {
            let usage = chunk.invocation_metrics.map(|m| m.usage());
            let metadata = GenerationMetadata {
                finish_reason: chunk.finish_reason,
                usage,
            };
            return Ok(Generation::new("").with_metadata(metadata));
        }
        Ok(Generation::new(chunk.text.unwrap_or_default()))
    }
}
