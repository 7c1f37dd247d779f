//! HTTP STT backend
//!
//! Sends WAV audio to an external recognition service. Recognition always
//! runs in English; the orchestrator handles re-translation afterwards.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use obaatanpa_core::{Error, LanguageCode, Result, SpeechToText};

/// STT service configuration
#[derive(Debug, Clone)]
pub struct HttpSttConfig {
    /// Base URL of the recognition service
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpSttConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8090".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Response from the recognition service
#[derive(Debug, Deserialize)]
struct SttResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    error: Option<String>,
}

/// STT backend calling an external HTTP service
pub struct HttpSttBackend {
    config: HttpSttConfig,
    client: Client,
}

impl HttpSttBackend {
    pub fn new(config: HttpSttConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::SttService(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn new_with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(HttpSttConfig {
            endpoint: endpoint.into(),
            ..Default::default()
        })
    }
}

#[async_trait]
impl SpeechToText for HttpSttBackend {
    async fn transcribe(&self, wav: &[u8], lang: &LanguageCode) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/transcribe", self.config.endpoint))
            .query(&[("language", lang.as_str())])
            .header("content-type", "audio/wav")
            .body(wav.to_vec())
            .send()
            .await
            .map_err(|e| Error::SttService(format!("STT service unreachable: {}", e)))?;

        let status = response.status();
        if status.is_client_error() {
            // The service saw the audio but could not make out any speech.
            return Err(Error::UnintelligibleAudio);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::SttService(format!(
                "STT service returned {}: {}",
                status, body
            )));
        }

        let body: SttResponse = response
            .json()
            .await
            .map_err(|e| Error::SttService(format!("invalid STT response: {}", e)))?;

        if let Some(error) = body.error {
            tracing::warn!(error = %error, "recognition service reported an error");
            return Err(Error::UnintelligibleAudio);
        }
        if body.text.trim().is_empty() {
            return Err(Error::UnintelligibleAudio);
        }

        Ok(body.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wire_shape() {
        let body: SttResponse =
            serde_json::from_str(r#"{"text": "I have a headache", "confidence": 0.92}"#).unwrap();
        assert_eq!(body.text, "I have a headache");
        assert!(body.error.is_none());

        let body: SttResponse = serde_json::from_str(r#"{"error": "no speech"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("no speech"));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_stt_error() {
        let stt = HttpSttBackend::new_with_endpoint("http://127.0.0.1:9").unwrap();
        let result = stt.transcribe(b"RIFF", &LanguageCode::english()).await;
        assert!(matches!(result, Err(Error::SttService(_))));
    }
}
