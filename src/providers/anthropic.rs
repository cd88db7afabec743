//! Anthropic Claude text-completion dialect.
//!
//! Claude's completion API takes the `\n\nHuman:`/`\n\nAssistant:`
//! conversation format and a mandatory API version string. The generic
//! `num_generations`, `logit_bias` and `truncate` options have no
//! representation in this payload and are intentionally omitted by
//! `translate`.
//!
//! Streaming chunks reuse the response shape: content chunks carry a
//! `completion` delta, and the terminal chunk additionally carries the
//! hosting service's invocation metrics.

use serde::{Deserialize, Serialize};

use crate::adapter::ChatAdapter;
use crate::error::GatewayError;
use crate::types::{ChatMessage, ChatOptions, ChatResponse, Generation, GenerationMetadata};

use super::{InvocationMetrics, PromptFormatter};

/// API version string sent with every request.
pub const DEFAULT_ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Claude completion request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicChatRequest {
    /// Rendered prompt string
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(rename = "max_tokens_to_sample", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    pub anthropic_version: String,
}

/// Claude response payload, also the shape of every streaming chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicChatResponse {
    #[serde(default)]
    pub completion: String,
    pub stop_reason: Option<String>,
    #[serde(rename = "amazon-bedrock-invocationMetrics")]
    pub invocation_metrics: Option<InvocationMetrics>,
}

/// Adapter for the Claude text-completion dialect.
#[derive(Debug, Clone)]
pub struct AnthropicAdapter {
    version: String,
}

impl AnthropicAdapter {
    /// Adapter using [`DEFAULT_ANTHROPIC_VERSION`].
    pub fn new() -> Self {
        Self {
            version: DEFAULT_ANTHROPIC_VERSION.to_string(),
        }
    }

    /// Pin a specific API version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl Default for AnthropicAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatAdapter for AnthropicAdapter {
    type Request = AnthropicChatRequest;
    type Response = AnthropicChatResponse;
    type Chunk = AnthropicChatResponse;

    fn translate(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
        _stream: bool,
    ) -> Result<AnthropicChatRequest, GatewayError> {
        Ok(AnthropicChatRequest {
            prompt: PromptFormatter::anthropic().format(messages),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            top_k: options.top_k,
            top_p: options.top_p,
            stop_sequences: options.stop_sequences.clone(),
            anthropic_version: self.version.clone(),
        })
    }

    fn normalize(&self, response: AnthropicChatResponse) -> Result<ChatResponse, GatewayError> {
        let mut generation = Generation::new(response.completion);
        if let Some(reason) = response.stop_reason {
            generation = generation.with_metadata(GenerationMetadata::new(reason, None));
        }
        Ok(ChatResponse::new(vec![generation]))
    }

    fn normalize_chunk(&self, chunk: AnthropicChatResponse) -> Result<Generation, GatewayError> {
        if let Some(metrics) = chunk.invocation_metrics {
            let metadata = GenerationMetadata {
                finish_reason: chunk.stop_reason,
                usage: Some(metrics.usage()),
            };
            return Ok(Generation::new("").with_metadata(metadata));
        }
        Ok(Generation::new(chunk.completion))
    }

    fn base_options(&self) -> ChatOptions {
        ChatOptions::new()
            .with_temperature(0.8)
            .with_max_tokens(500)
            .with_top_k(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_uses_conversation_prompt_and_version() {
        let options = ChatOptions::new()
            .with_temperature(0.2)
            .with_max_tokens(300)
            .with_top_k(15)
            .with_top_p(0.85)
            .with_stop_sequences(vec!["\n\nHuman:".to_string()]);

        let request = AnthropicAdapter::new()
            .translate(&[ChatMessage::user("hello")], &options, false)
            .unwrap();

        assert_eq!(request.prompt, "\n\nHuman: hello\n\nAssistant:");
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_tokens, Some(300));
        assert_eq!(request.top_k, Some(15));
        assert_eq!(request.top_p, Some(0.85));
        assert_eq!(request.anthropic_version, DEFAULT_ANTHROPIC_VERSION);
    }

    #[test]
    fn request_wire_shape_renames_max_tokens() {
        let request = AnthropicAdapter::new()
            .translate(
                &[ChatMessage::user("hi")],
                &ChatOptions::new().with_max_tokens(42),
                false,
            )
            .unwrap();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["max_tokens_to_sample"], serde_json::json!(42));
        assert!(value.get("max_tokens").is_none());
        assert_eq!(
            value["anthropic_version"],
            serde_json::json!("bedrock-2023-05-31")
        );
        assert!(value.get("temperature").is_none());
    }

    #[test]
    fn normalize_yields_single_generation() {
        let response: AnthropicChatResponse = serde_json::from_value(serde_json::json!({
            "completion": " Rust is a systems language.",
            "stop_reason": "stop_sequence"
        }))
        .unwrap();

        let normalized = AnthropicAdapter::new().normalize(response).unwrap();
        assert_eq!(normalized.generations.len(), 1);
        assert_eq!(normalized.generations[0].text, " Rust is a systems language.");
        assert_eq!(
            normalized.generations[0]
                .metadata
                .as_ref()
                .unwrap()
                .finish_reason
                .as_deref(),
            Some("stop_sequence")
        );
    }

    #[test]
    fn content_chunk_passes_completion_through() {
        let chunk: AnthropicChatResponse = serde_json::from_value(serde_json::json!({
            "completion": " partial",
            "stop_reason": null
        }))
        .unwrap();

        let generation = AnthropicAdapter::new().normalize_chunk(chunk).unwrap();
        assert_eq!(generation.text, " partial");
        assert!(generation.metadata.is_none());
    }

    #[test]
    fn terminal_chunk_is_empty_and_carries_usage() {
        let chunk: AnthropicChatResponse = serde_json::from_value(serde_json::json!({
            "completion": "",
            "stop_reason": "max_tokens",
            "amazon-bedrock-invocationMetrics": {
                "inputTokenCount": 8,
                "outputTokenCount": 11,
                "invocationLatency": 700,
                "firstByteLatency": 55
            }
        }))
        .unwrap();

        let generation = AnthropicAdapter::new().normalize_chunk(chunk).unwrap();
        assert_eq!(generation.text, "");
        let metadata = generation.metadata.unwrap();
        assert_eq!(metadata.finish_reason.as_deref(), Some("max_tokens"));
        let usage = metadata.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 8);
        assert_eq!(usage.generation_tokens, 11);
        assert_eq!(usage.total_tokens, 19);
    }

    #[test]
    fn base_options_carry_vendor_defaults() {
        let base = AnthropicAdapter::new().base_options();
        assert_eq!(base.temperature, Some(0.8));
        assert_eq!(base.max_tokens, Some(500));
        assert_eq!(base.top_k, Some(10));
    }
}
