//! Prompt and response types
//!
//! A `Prompt` is what the caller hands to the gateway: an ordered list of
//! role-tagged messages plus optional call-scoped options. `ChatResponse`
//! is what comes back: one `Generation` per alternative the vendor produced,
//! in emission order. All of these are constructed once and never mutated
//! by the gateway.

use serde::{Deserialize, Serialize};

use super::options::ModelOptions;

/// Role of a chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Instructions that frame the conversation
    System,
    /// The human side of the conversation
    User,
    /// A prior model turn
    Assistant,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author role
    pub role: MessageRole,
    /// Text content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Input to one gateway call: ordered messages plus optional per-call options.
///
/// Per-call options are carried as a capability object rather than a concrete
/// struct so that callers with vendor-specific option types can still pass
/// them through, as long as they expose the generic chat parameters. See
/// [`ModelOptions`].
pub struct Prompt {
    messages: Vec<ChatMessage>,
    options: Option<Box<dyn ModelOptions>>,
}

impl Prompt {
    /// Create a prompt from an ordered message list.
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            options: None,
        }
    }

    /// Convenience constructor for a single user message.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![ChatMessage::user(text)])
    }

    /// Attach call-scoped options.
    pub fn with_options(mut self, options: impl ModelOptions + 'static) -> Self {
        self.options = Some(Box::new(options));
        self
    }

    /// The ordered message list.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The call-scoped options, if any.
    pub fn options(&self) -> Option<&dyn ModelOptions> {
        self.options.as_deref()
    }
}

impl std::fmt::Debug for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompt")
            .field("messages", &self.messages)
            .field("options", &self.options.as_ref().map(|o| o.type_name()))
            .finish()
    }
}

/// Token accounting for one invocation.
///
/// `total_tokens` is computed once at construction; the struct carries no
/// lazily-derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens produced by the model
    pub generation_tokens: u32,
    /// Sum of prompt and generation tokens
    pub total_tokens: u32,
}

impl Usage {
    /// Create usage statistics, computing the total.
    pub const fn new(prompt_tokens: u32, generation_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            generation_tokens,
            total_tokens: prompt_tokens + generation_tokens,
        }
    }
}

/// Metadata attached to a generation once the vendor reports completion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Vendor finish reason, passed through verbatim
    pub finish_reason: Option<String>,
    /// Aggregate token usage, when the vendor reports it
    pub usage: Option<Usage>,
}

impl GenerationMetadata {
    /// Metadata carrying a finish reason and optional usage.
    pub fn new(finish_reason: impl Into<String>, usage: Option<Usage>) -> Self {
        Self {
            finish_reason: Some(finish_reason.into()),
            usage,
        }
    }
}

/// One normalized generated alternative.
///
/// Streaming terminal chunks produce a generation with empty text and
/// populated metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    /// Generated text (possibly empty for a terminal usage-only chunk)
    pub text: String,
    /// Completion metadata, absent on partial output
    pub metadata: Option<GenerationMetadata>,
}

impl Generation {
    /// A generation with text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: None,
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: GenerationMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Ordered set of generations produced by one logical call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generations in vendor emission order
    pub generations: Vec<Generation>,
}

impl ChatResponse {
    /// Create a response from an ordered generation list.
    pub fn new(generations: Vec<Generation>) -> Self {
        Self { generations }
    }

    /// Text of the first generation, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.generations.first().map(|g| g.text.as_str())
    }
}
