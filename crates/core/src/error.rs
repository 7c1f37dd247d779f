//! Shared error type for backend adapters

use thiserror::Error;

/// Result alias used throughout the workspace
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the external-service adapters.
///
/// Adapter-level failures only. The pipeline crate maps these onto its
/// user-facing error taxonomy; HTTP status mapping happens at the server
/// boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("translation failed: {0}")]
    Translation(String),

    #[error("language model error: {0}")]
    Llm(String),

    #[error("invalid language model response: {0}")]
    InvalidResponse(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("could not understand audio")]
    UnintelligibleAudio,

    #[error("speech recognition service unavailable: {0}")]
    SttService(String),

    #[error("audio processing failed: {0}")]
    Audio(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
