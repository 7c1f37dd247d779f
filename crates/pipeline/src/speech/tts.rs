//! HTTP TTS backend
//!
//! Sends text to an external synthesis service and returns MP3 bytes.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use obaatanpa_core::{Error, LanguageCode, Result, TextToSpeech};

/// TTS service configuration
#[derive(Debug, Clone)]
pub struct HttpTtsConfig {
    /// Base URL of the synthesis service
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpTtsConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8091".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    lang: &'a str,
}

/// TTS backend calling an external HTTP service
pub struct HttpTtsBackend {
    config: HttpTtsConfig,
    client: Client,
}

impl HttpTtsBackend {
    pub fn new(config: HttpTtsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Synthesis(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn new_with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(HttpTtsConfig {
            endpoint: endpoint.into(),
            ..Default::default()
        })
    }
}

#[async_trait]
impl TextToSpeech for HttpTtsBackend {
    async fn synthesize(&self, text: &str, lang: &LanguageCode) -> Result<Vec<u8>> {
        let request = SynthesizeRequest {
            text,
            lang: lang.as_str(),
        };

        let response = self
            .client
            .post(format!("{}/synthesize", self.config.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Synthesis(format!("TTS service unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Synthesis(format!(
                "TTS service returned {}: {}",
                status, body
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| Error::Synthesis(format!("failed to read TTS response: {}", e)))?;

        Ok(audio.to_vec())
    }
}
