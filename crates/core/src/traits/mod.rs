//! Trait seams for pluggable external-service backends

pub mod llm;
pub mod speech;
pub mod text;

pub use llm::LanguageModel;
pub use speech::{AudioTranscoder, SpeechToText, TextToSpeech};
pub use text::Translator;
