//! Reference vendor adapters.
//!
//! One module per payload dialect hosted on the managed foundation-model
//! service: Cohere Command, Titan Text, and Anthropic Claude (text
//! completion). Each module carries the vendor wire DTOs and a
//! [`crate::adapter::ChatAdapter`] implementation; the shared pieces below
//! cover what every dialect needs: turning a role-tagged message list into
//! a completion-style prompt string, and reading the hosting service's
//! invocation metrics.

pub mod anthropic;
pub mod cohere;
pub mod titan;

use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, MessageRole, Usage};

/// Renders an ordered message list as a single completion-style prompt.
///
/// This is the per-vendor prompt-encoding strategy: completion-era models
/// take one string of role-prefixed turns with a trailing assistant cue,
/// but the exact prefixes and separators are a vendor dialect.
#[derive(Debug, Clone, Copy)]
pub struct PromptFormatter {
    human_prefix: &'static str,
    assistant_prefix: &'static str,
    turn_terminator: &'static str,
}

impl PromptFormatter {
    /// "Human:"/"Assistant:" turns, one per line (Cohere/Titan dialect).
    pub const fn turns() -> Self {
        Self {
            human_prefix: "Human:",
            assistant_prefix: "Assistant:",
            turn_terminator: "\n",
        }
    }

    /// The "\n\nHuman:"/"\n\nAssistant:" conversation dialect used by
    /// Claude text-completion models.
    pub const fn anthropic() -> Self {
        Self {
            human_prefix: "\n\nHuman:",
            assistant_prefix: "\n\nAssistant:",
            turn_terminator: "",
        }
    }

    /// Render the messages: system text first, then role-prefixed turns,
    /// ending with the assistant prefix as a generation cue.
    pub fn format(&self, messages: &[ChatMessage]) -> String {
        let mut out = String::new();
        for message in messages {
            let prefix = match message.role {
                MessageRole::System => {
                    out.push_str(&message.content);
                    out.push_str(self.turn_terminator);
                    continue;
                }
                MessageRole::User => self.human_prefix,
                MessageRole::Assistant => self.assistant_prefix,
            };
            out.push_str(prefix);
            out.push(' ');
            out.push_str(&message.content);
            out.push_str(self.turn_terminator);
        }
        out.push_str(self.assistant_prefix);
        out
    }
}

/// Invocation metrics the hosting service attaches to the terminal chunk of
/// a stream (the `amazon-bedrock-invocationMetrics` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationMetrics {
    /// Tokens consumed by the prompt
    pub input_token_count: u32,
    /// Tokens produced by the model
    pub output_token_count: u32,
    /// End-to-end invocation latency in milliseconds
    pub invocation_latency: u64,
    /// Time to first byte in milliseconds
    pub first_byte_latency: u64,
}

impl InvocationMetrics {
    /// Derive normalized usage from the metrics object.
    pub fn usage(&self) -> Usage {
        Usage::new(self.input_token_count, self.output_token_count)
    }
}
