//! Titan Text dialect.
//!
//! Titan's generation config only covers temperature, top-p, the token
//! budget and stop sequences. The generic `top_k`, `num_generations`,
//! `logit_bias` and `truncate` options have no representation in this
//! payload and are intentionally omitted by `translate`; Titan always
//! produces a single generation and manages prompt length itself.
//!
//! Streaming usage comes in two mutually exclusive shapes: the hosting
//! service's invocation-metrics object, or Titan's own input/output token
//! counters on the final chunk. When both appear, the invocation-metrics
//! object wins.

use serde::{Deserialize, Serialize};

use crate::adapter::ChatAdapter;
use crate::error::GatewayError;
use crate::types::{
    ChatMessage, ChatOptions, ChatResponse, Generation, GenerationMetadata, Usage,
};

use super::{InvocationMetrics, PromptFormatter};

/// Titan completion request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanChatRequest {
    /// Rendered prompt string
    pub input_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_generation_config: Option<TitanTextGenerationConfig>,
}

/// Sampling configuration block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanTextGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_token_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl TitanTextGenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.top_p.is_none()
            && self.max_token_count.is_none()
            && self.stop_sequences.is_none()
    }
}

/// One result in a non-streaming response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanChatResult {
    pub token_count: Option<u32>,
    pub output_text: String,
    pub completion_reason: Option<String>,
}

/// Titan non-streaming response payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanChatResponse {
    pub input_text_token_count: Option<u32>,
    pub results: Vec<TitanChatResult>,
}

/// One streaming chunk. The final chunk carries the completion reason and
/// one of the two usage shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanChatChunk {
    pub index: Option<u32>,
    #[serde(default)]
    pub output_text: String,
    pub completion_reason: Option<String>,
    pub input_text_token_count: Option<u32>,
    pub total_output_text_token_count: Option<u32>,
    #[serde(rename = "amazon-bedrock-invocationMetrics")]
    pub invocation_metrics: Option<InvocationMetrics>,
}

/// Adapter for the Titan Text dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitanAdapter;

impl TitanAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ChatAdapter for TitanAdapter {
    type Request = TitanChatRequest;
    type Response = TitanChatResponse;
    type Chunk = TitanChatChunk;

    fn translate(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
        _stream: bool,
    ) -> Result<TitanChatRequest, GatewayError> {
        let config = TitanTextGenerationConfig {
            temperature: options.temperature,
            top_p: options.top_p,
            max_token_count: options.max_tokens,
            stop_sequences: options.stop_sequences.clone(),
        };
        Ok(TitanChatRequest {
            input_text: PromptFormatter::turns().format(messages),
            text_generation_config: if config.is_empty() { None } else { Some(config) },
        })
    }

    fn normalize(&self, response: TitanChatResponse) -> Result<ChatResponse, GatewayError> {
        let generations = response
            .results
            .into_iter()
            .map(|result| {
                let mut generation = Generation::new(result.output_text);
                if let Some(reason) = result.completion_reason {
                    generation = generation.with_metadata(GenerationMetadata::new(reason, None));
                }
                generation
            })
            .collect();
        Ok(ChatResponse::new(generations))
    }

    fn normalize_chunk(&self, chunk: TitanChatChunk) -> Result<Generation, GatewayError> {
        let mut generation = Generation::new(chunk.output_text);

        if let Some(metrics) = chunk.invocation_metrics {
            generation = generation.with_metadata(GenerationMetadata {
                finish_reason: chunk.completion_reason,
                usage: Some(metrics.usage()),
            });
        } else if let (Some(input), Some(output)) = (
            chunk.input_text_token_count,
            chunk.total_output_text_token_count,
        ) {
            generation = generation.with_metadata(GenerationMetadata {
                finish_reason: chunk.completion_reason,
                usage: Some(Usage::new(input, output)),
            });
        }

        Ok(generation)
    }

    fn base_options(&self) -> ChatOptions {
        ChatOptions::new().with_temperature(0.8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_maps_supported_options_into_config_block() {
        let options = ChatOptions::new()
            .with_temperature(0.6)
            .with_top_p(0.95)
            .with_max_tokens(512)
            .with_stop_sequences(vec!["User:".to_string()]);

        let request = TitanAdapter::new()
            .translate(&[ChatMessage::user("hello")], &options, false)
            .unwrap();

        assert_eq!(request.input_text, "Human: hello\nAssistant:");
        let config = request.text_generation_config.unwrap();
        assert_eq!(config.temperature, Some(0.6));
        assert_eq!(config.top_p, Some(0.95));
        assert_eq!(config.max_token_count, Some(512));
        assert_eq!(config.stop_sequences, Some(vec!["User:".to_string()]));
    }

    #[test]
    fn empty_options_omit_the_config_block() {
        let request = TitanAdapter::new()
            .translate(&[ChatMessage::user("hello")], &ChatOptions::new(), false)
            .unwrap();
        assert!(request.text_generation_config.is_none());

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("textGenerationConfig").is_none());
        assert_eq!(value["inputText"], serde_json::json!("Human: hello\nAssistant:"));
    }

    #[test]
    fn normalize_yields_one_generation_per_result() {
        let response: TitanChatResponse = serde_json::from_value(serde_json::json!({
            "inputTextTokenCount": 12,
            "results": [
                { "tokenCount": 30, "outputText": "alpha", "completionReason": "FINISH" },
                { "tokenCount": 14, "outputText": "beta", "completionReason": null }
            ]
        }))
        .unwrap();

        let normalized = TitanAdapter::new().normalize(response).unwrap();
        assert_eq!(normalized.generations.len(), 2);
        assert_eq!(normalized.generations[0].text, "alpha");
        assert_eq!(
            normalized.generations[0]
                .metadata
                .as_ref()
                .unwrap()
                .finish_reason
                .as_deref(),
            Some("FINISH")
        );
        assert!(normalized.generations[1].metadata.is_none());
    }

    #[test]
    fn terminal_chunk_prefers_invocation_metrics_over_counters() {
        let chunk: TitanChatChunk = serde_json::from_value(serde_json::json!({
            "outputText": "",
            "completionReason": "FINISH",
            "inputTextTokenCount": 100,
            "totalOutputTextTokenCount": 200,
            "amazon-bedrock-invocationMetrics": {
                "inputTokenCount": 3,
                "outputTokenCount": 4,
                "invocationLatency": 500,
                "firstByteLatency": 40
            }
        }))
        .unwrap();

        let generation = TitanAdapter::new().normalize_chunk(chunk).unwrap();
        let usage = generation.metadata.unwrap().usage.unwrap();
        // metrics object wins, not the 100/200 counters
        assert_eq!(usage.prompt_tokens, 3);
        assert_eq!(usage.generation_tokens, 4);
    }

    #[test]
    fn terminal_chunk_falls_back_to_token_counters() {
        let chunk: TitanChatChunk = serde_json::from_value(serde_json::json!({
            "outputText": "",
            "completionReason": "LENGTH",
            "inputTextTokenCount": 9,
            "totalOutputTextTokenCount": 21
        }))
        .unwrap();

        let generation = TitanAdapter::new().normalize_chunk(chunk).unwrap();
        let metadata = generation.metadata.unwrap();
        assert_eq!(metadata.finish_reason.as_deref(), Some("LENGTH"));
        let usage = metadata.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 9);
        assert_eq!(usage.generation_tokens, 21);
        assert_eq!(usage.total_tokens, 30);
    }

    #[test]
    fn content_chunk_has_no_metadata() {
        let chunk: TitanChatChunk = serde_json::from_value(serde_json::json!({
            "outputText": "partial text"
        }))
        .unwrap();

        let generation = TitanAdapter::new().normalize_chunk(chunk).unwrap();
        assert_eq!(generation.text, "partial text");
        assert!(generation.metadata.is_none());
    }

    #[test]
    fn base_options_carry_default_temperature() {
        assert_eq!(TitanAdapter::new().base_options().temperature, Some(0.8));
    }
}
