//! Speech adapters
//!
//! External TTS and STT services plus the ffmpeg-based transcoder that
//! converts uploaded WebM/Opus audio to WAV for recognition.

pub mod stt;
pub mod transcode;
pub mod tts;

pub use stt::{HttpSttBackend, HttpSttConfig};
pub use transcode::FfmpegTranscoder;
pub use tts::{HttpTtsBackend, HttpTtsConfig};
