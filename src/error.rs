//! Error Handling Module
//!
//! One error type for the whole gateway, split along the axis the retry
//! executor cares about: transient failures (throttling, connection blips)
//! are retried, everything else surfaces immediately. Streaming adds two
//! phase-tagged wrappers: `StreamEstablishment` for failures before the
//! first chunk and `MidStream` for failures after output has started.

use thiserror::Error;

/// Gateway error type
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Prompt-level options do not expose the generic chat parameters.
    ///
    /// Raised synchronously before any vendor call is attempted.
    #[error("prompt options of type {type_name} do not expose chat options")]
    InvalidOptionsType {
        /// Type name of the rejected options object
        type_name: &'static str,
    },

    /// The vendor throttled the request. Transient.
    #[error("throttled by provider: {0}")]
    Throttled(String),

    /// Network-level failure reaching the vendor. Transient.
    #[error("connection error: {0}")]
    ConnectionError(String),

    /// Credential or signature problem. Permanent.
    #[error("authentication error: {0}")]
    AuthenticationError(String),

    /// The vendor rejected the request as malformed. Permanent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A vendor payload could not be interpreted. Permanent.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Classified vendor API error with the original status code.
    #[error("API error {code}: {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message
        message: String,
        /// Opaque error body, when available
        details: Option<serde_json::Value>,
    },

    /// All retry attempts were spent on transient failures.
    #[error("retry attempts exhausted after {attempts} attempts: {cause}")]
    RetryExhausted {
        /// Number of attempts made
        attempts: u32,
        /// The last transient error observed
        #[source]
        cause: Box<GatewayError>,
    },

    /// The stream could not be established (no chunk was ever delivered).
    #[error("stream establishment failed: {0}")]
    StreamEstablishment(#[source] Box<GatewayError>),

    /// The stream failed after output had started. Never retried; results
    /// already emitted are not retracted.
    #[error("stream failed mid-flight: {0}")]
    MidStream(#[source] Box<GatewayError>),

    /// Invariant violation inside the gateway itself.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Create a throttling error
    pub fn throttled(message: impl Into<String>) -> Self {
        Self::Throttled(message.into())
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionError(message.into())
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::AuthenticationError(message.into())
    }

    /// Create an invalid-request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }

    /// Classify a vendor HTTP status into a gateway error.
    ///
    /// Throttling and auth statuses map to their dedicated variants so the
    /// retry executor can tell them apart; everything else is carried as
    /// `Api` with the original code.
    pub fn from_status(
        code: u16,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        let message = message.into();
        match code {
            429 => Self::Throttled(message),
            401 | 403 => Self::AuthenticationError(message),
            400 | 413 | 415 | 422 => Self::InvalidRequest(message),
            _ => Self::Api {
                code,
                message,
                details,
            },
        }
    }

    /// Whether the retry executor may attempt this operation again.
    ///
    /// `StreamEstablishment` reports its cause's transience for callers that
    /// layer their own retry outside the gateway; the gateway's executor runs
    /// before the wrapper is applied and never sees it. `MidStream` is never
    /// transient, whatever the cause.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Throttled(_) | Self::ConnectionError(_) => true,
            Self::Api { code, .. } => *code == 429 || *code >= 500,
            Self::StreamEstablishment(cause) => cause.is_transient(),
            _ => false,
        }
    }

    /// HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            Self::Throttled(_) => Some(429),
            Self::AuthenticationError(_) => Some(401),
            _ => None,
        }
    }
}
