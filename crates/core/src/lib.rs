//! Core traits and types for the maternal-health chat relay
//!
//! This crate provides foundational types used across all other crates:
//! - Core traits for pluggable backends (LLM, translation, TTS, STT)
//! - Language code handling
//! - LLM request/response types
//! - Error types

pub mod error;
pub mod language;
pub mod llm_types;
pub mod traits;

pub use error::{Error, Result};
pub use language::LanguageCode;
pub use llm_types::{GenerateOutcome, GenerateReply, GenerateRequest};

// Trait re-exports
pub use traits::{
    // LLM
    LanguageModel,
    // Speech
    AudioTranscoder,
    SpeechToText,
    TextToSpeech,
    // Text processing
    Translator,
};
