//! Speech processing traits

use async_trait::async_trait;

use crate::{LanguageCode, Result};

/// Text-to-Speech interface
///
/// Implementations:
/// - `HttpTtsBackend` - external synthesis service returning MP3 bytes
#[async_trait]
pub trait TextToSpeech: Send + Sync + 'static {
    /// Synthesize text to MP3 audio.
    ///
    /// The caller is responsible for remapping locale codes the backend
    /// does not support (e.g. `ak` -> `en-US`).
    async fn synthesize(&self, text: &str, lang: &LanguageCode) -> Result<Vec<u8>>;
}

/// Speech-to-Text interface
///
/// Implementations:
/// - `HttpSttBackend` - external recognition service
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    /// Transcribe WAV audio to text.
    ///
    /// Returns `Error::UnintelligibleAudio` when the service could not make
    /// out any speech, and `Error::SttService` when the service itself
    /// failed.
    async fn transcribe(&self, wav: &[u8], lang: &LanguageCode) -> Result<String>;
}

/// Audio transcoding interface
///
/// Uploaded audio arrives as WebM/Opus; recognition wants WAV. Kept behind
/// a trait so the orchestrator can be tested without an ffmpeg binary.
#[async_trait]
pub trait AudioTranscoder: Send + Sync + 'static {
    /// Convert compressed audio (WebM/Opus) to 16 kHz mono WAV.
    ///
    /// Implementations must not leak scratch files on any exit path.
    async fn to_wav(&self, audio: &[u8]) -> Result<Vec<u8>>;
}
