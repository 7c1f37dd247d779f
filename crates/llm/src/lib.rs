//! LLM gateway for the maternal-health chat relay
//!
//! Wraps the Anthropic Messages API behind the `LanguageModel` trait with
//! a fixed medical persona and token cap. One attempt per call; API-level
//! failures are reported as data, not errors.

pub mod gateway;
pub mod persona;

pub use gateway::{ClaudeConfig, ClaudeGateway};
pub use persona::MEDICAL_PERSONA;

use thiserror::Error;

/// LLM gateway errors (transport and decoding only; API-level failures
/// are `GenerateOutcome::ApiFailure`)
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}

impl From<LlmError> for obaatanpa_core::Error {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::InvalidResponse(msg) => obaatanpa_core::Error::InvalidResponse(msg),
            other => obaatanpa_core::Error::Llm(other.to_string()),
        }
    }
}
