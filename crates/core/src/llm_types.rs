//! LLM request/response types
//!
//! Common types for the language model gateway. The gateway never turns an
//! API-level failure into an `Err`: a non-success HTTP status becomes
//! `GenerateOutcome::ApiFailure` so callers must branch on it explicitly.

use serde::{Deserialize, Serialize};

/// LLM generation request
///
/// Built fresh per call by the gateway, which injects the system persona
/// and the configured token cap around the caller's prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// System-level persona instruction
    pub system: String,
    /// User prompt
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl GenerateRequest {
    /// Create a request with a system persona and user prompt
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            max_tokens: 200,
        }
    }

    /// Set the token cap
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReply {
    /// Raw generated text (unformatted)
    pub text: String,
    /// Whether the response envelope carried `retry`/`edit` keys.
    ///
    /// Vestigial: the documented Messages API does not return these keys,
    /// but the frontend contract exposes the flag, so it is preserved.
    pub show_icons: bool,
}

/// Outcome of a gateway call
///
/// `ApiFailure` carries the backend's status and message verbatim; the
/// orchestrator surfaces the message as the reply text with a 500.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The model produced text
    Reply(GenerateReply),
    /// The backend answered with a non-success status
    ApiFailure { status: u16, message: String },
}

impl GenerateOutcome {
    /// Convenience constructor for tests and mocks
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply(GenerateReply {
            text: text.into(),
            show_icons: false,
        })
    }
}
