//! Generation options and the per-call options capability.
//!
//! `ChatOptions` is an immutable bag of optional generation parameters. The
//! override chain (vendor base defaults < gateway instance defaults <
//! prompt-level options) is realized through [`ChatOptions::merge`], a pure
//! field-wise override: a populated right-hand field wins wholesale, fields
//! are never partially combined.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How a vendor should truncate an over-length prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Truncate {
    /// Reject over-length input
    None,
    /// Drop tokens from the start of the prompt
    Start,
    /// Drop tokens from the end of the prompt
    End,
}

/// Generic chat generation parameters.
///
/// Every field is optional; an absent field means "use the next layer's
/// default". Vendors that cannot represent a field document the omission in
/// their adapter module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    /// Sampling temperature
    pub temperature: Option<f64>,
    /// Nucleus sampling cutoff
    pub top_p: Option<f64>,
    /// Top-k sampling cutoff
    pub top_k: Option<u32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Sequences that stop generation
    pub stop_sequences: Option<Vec<String>>,
    /// Number of alternatives to generate
    pub num_generations: Option<u32>,
    /// Per-token likelihood adjustments
    pub logit_bias: Option<HashMap<String, f64>>,
    /// Prompt truncation policy
    pub truncate: Option<Truncate>,
}

impl ChatOptions {
    /// Create empty options (every field deferred to defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampling temperature
    pub const fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the nucleus sampling cutoff
    pub const fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set the top-k sampling cutoff
    pub const fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Set the generation token budget
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the stop sequences
    pub fn with_stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = Some(stop_sequences);
        self
    }

    /// Set the number of alternatives to generate
    pub const fn with_num_generations(mut self, num_generations: u32) -> Self {
        self.num_generations = Some(num_generations);
        self
    }

    /// Set per-token likelihood adjustments
    pub fn with_logit_bias(mut self, logit_bias: HashMap<String, f64>) -> Self {
        self.logit_bias = Some(logit_bias);
        self
    }

    /// Set the prompt truncation policy
    pub const fn with_truncate(mut self, truncate: Truncate) -> Self {
        self.truncate = Some(truncate);
        self
    }

    /// Field-wise override merge.
    ///
    /// Each populated field of `overrides` replaces the corresponding field
    /// of `self`; absent override fields fall through. Collection-valued
    /// fields are replaced as a whole, never element-merged.
    pub fn merge(&self, overrides: &ChatOptions) -> ChatOptions {
        ChatOptions {
            temperature: overrides.temperature.or(self.temperature),
            top_p: overrides.top_p.or(self.top_p),
            top_k: overrides.top_k.or(self.top_k),
            max_tokens: overrides.max_tokens.or(self.max_tokens),
            stop_sequences: overrides
                .stop_sequences
                .clone()
                .or_else(|| self.stop_sequences.clone()),
            num_generations: overrides.num_generations.or(self.num_generations),
            logit_bias: overrides
                .logit_bias
                .clone()
                .or_else(|| self.logit_bias.clone()),
            truncate: overrides.truncate.or(self.truncate),
        }
    }
}

/// Capability a per-call options object must satisfy to be merged.
///
/// The gateway accepts any options object on a [`crate::types::Prompt`], but
/// only ones exposing the generic chat parameters participate in the option
/// merge; anything else fails the call with
/// [`crate::error::GatewayError::InvalidOptionsType`] before a vendor request
/// is built.
pub trait ModelOptions: Send + Sync {
    /// View of the generic chat parameters carried by this object, if any.
    fn as_chat_options(&self) -> Option<ChatOptions>;

    /// Human-readable type name used in error reporting.
    fn type_name(&self) -> &'static str;
}

impl ModelOptions for ChatOptions {
    fn as_chat_options(&self) -> Option<ChatOptions> {
        Some(self.clone())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<ChatOptions>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_populated_override_fields() {
        let base = ChatOptions::new()
            .with_temperature(0.8)
            .with_top_p(0.9)
            .with_stop_sequences(vec!["END".to_string()]);
        let overrides = ChatOptions::new()
            .with_temperature(0.2)
            .with_max_tokens(128);

        let merged = base.merge(&overrides);
        assert_eq!(merged.temperature, Some(0.2));
        assert_eq!(merged.top_p, Some(0.9));
        assert_eq!(merged.max_tokens, Some(128));
        assert_eq!(merged.stop_sequences, Some(vec!["END".to_string()]));
    }

    #[test]
    fn merge_replaces_collections_wholesale() {
        let base = ChatOptions::new().with_stop_sequences(vec!["A".to_string(), "B".to_string()]);
        let overrides = ChatOptions::new().with_stop_sequences(vec!["C".to_string()]);

        let merged = base.merge(&overrides);
        assert_eq!(merged.stop_sequences, Some(vec!["C".to_string()]));
    }

    #[test]
    fn merge_of_empty_override_is_identity() {
        let base = ChatOptions::new()
            .with_temperature(0.7)
            .with_top_k(40)
            .with_truncate(Truncate::End);
        let merged = base.merge(&ChatOptions::new());
        assert_eq!(merged, base);
    }

    #[test]
    fn chat_options_expose_themselves() {
        let options = ChatOptions::new().with_temperature(0.3);
        let viewed = options.as_chat_options().expect("chat options capability");
        assert_eq!(viewed, options);
    }
}
