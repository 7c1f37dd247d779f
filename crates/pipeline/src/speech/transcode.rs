//! Audio transcoding via ffmpeg
//!
//! Browsers upload WebM/Opus; the recognition service wants 16 kHz mono
//! WAV. Scratch files are `tempfile::NamedTempFile`s, so they are removed
//! on every exit path (success, ffmpeg failure, early return) by RAII.

use async_trait::async_trait;
use tempfile::Builder;

use obaatanpa_core::{AudioTranscoder, Error, Result};

/// Transcoder shelling out to the `ffmpeg` binary
#[derive(Debug, Clone, Default)]
pub struct FfmpegTranscoder;

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn to_wav(&self, audio: &[u8]) -> Result<Vec<u8>> {
        if audio.is_empty() {
            return Err(Error::Audio("empty audio payload".to_string()));
        }

        let input = Builder::new()
            .prefix("obaatanpa_in_")
            .suffix(".webm")
            .tempfile()
            .map_err(|e| Error::Audio(format!("failed to create temp file: {}", e)))?;
        let output = Builder::new()
            .prefix("obaatanpa_out_")
            .suffix(".wav")
            .tempfile()
            .map_err(|e| Error::Audio(format!("failed to create temp file: {}", e)))?;

        tokio::fs::write(input.path(), audio)
            .await
            .map_err(|e| Error::Audio(format!("failed to write temp file: {}", e)))?;

        let result = tokio::process::Command::new("ffmpeg")
            .arg("-y")
            .arg("-i")
            .arg(input.path())
            .args(["-ar", "16000", "-ac", "1", "-f", "wav"])
            .arg(output.path())
            .output()
            .await
            .map_err(|e| Error::Audio(format!("failed to run ffmpeg: {}", e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            tracing::error!(status = ?result.status, "ffmpeg conversion failed: {}", stderr);
            return Err(Error::Audio("audio conversion failed".to_string()));
        }

        let wav = tokio::fs::read(output.path())
            .await
            .map_err(|e| Error::Audio(format!("failed to read converted audio: {}", e)))?;

        Ok(wav)
    }
}
