//! HTTP translation adapter
//!
//! Wraps a LibreTranslate-compatible service. Translation failures
//! propagate immediately (no caching, no retries); language detection is
//! best-effort and falls back to English on any failure.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use obaatanpa_core::{Error, LanguageCode, Result, Translator};

/// Translation service configuration
#[derive(Debug, Clone)]
pub struct HttpTranslatorConfig {
    /// Base URL of the translation service
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpTranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct DetectCandidate {
    language: String,
    #[serde(default)]
    confidence: f32,
}

/// Translator backed by an external HTTP service
pub struct HttpTranslator {
    config: HttpTranslatorConfig,
    client: Client,
}

impl HttpTranslator {
    pub fn new(config: HttpTranslatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Translation(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn new_with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(HttpTranslatorConfig {
            endpoint: endpoint.into(),
            ..Default::default()
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint, path)
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Result<String> {
        let request = TranslateRequest {
            q: text,
            source: from.as_str(),
            target: to.as_str(),
            format: "text",
        };

        let response = self
            .client
            .post(self.api_url("/translate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Translation(format!("translation service unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Translation(format!(
                "translation service returned {}: {}",
                status, body
            )));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| Error::Translation(format!("invalid translation response: {}", e)))?;

        Ok(body.translated_text)
    }

    async fn detect_language(&self, text: &str) -> LanguageCode {
        if text.trim().is_empty() {
            return LanguageCode::english();
        }

        let result: std::result::Result<Vec<DetectCandidate>, reqwest::Error> = async {
            self.client
                .post(self.api_url("/detect"))
                .json(&serde_json::json!({ "q": text }))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await
        }
        .await;

        match result {
            Ok(candidates) => candidates
                .into_iter()
                .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
                .map(|c| LanguageCode::new(c.language))
                .unwrap_or_else(LanguageCode::english),
            Err(e) => {
                tracing::debug!(error = %e, "language detection failed, defaulting to en");
                LanguageCode::english()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = TranslateRequest {
            q: "Me yam ka me",
            source: "ak",
            target: "en",
            format: "text",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["q"], "Me yam ka me");
        assert_eq!(json["source"], "ak");
        assert_eq!(json["target"], "en");
    }

    #[test]
    fn test_response_wire_shape() {
        let body: TranslateResponse =
            serde_json::from_str(r#"{"translatedText": "My stomach hurts"}"#).unwrap();
        assert_eq!(body.translated_text, "My stomach hurts");
    }

    #[tokio::test]
    async fn test_detect_empty_text_defaults_to_english() {
        let translator = HttpTranslator::new(HttpTranslatorConfig::default()).unwrap();
        assert_eq!(
            translator.detect_language("   ").await,
            LanguageCode::english()
        );
    }

    #[tokio::test]
    async fn test_detect_unreachable_service_defaults_to_english() {
        // nothing listens on this port; detection must not error out
        let translator = HttpTranslator::new_with_endpoint("http://127.0.0.1:9").unwrap();
        assert_eq!(
            translator.detect_language("hello there").await,
            LanguageCode::english()
        );
    }

    #[tokio::test]
    async fn test_translate_unreachable_service_is_an_error() {
        let translator = HttpTranslator::new_with_endpoint("http://127.0.0.1:9").unwrap();
        let result = translator
            .translate("hello", &LanguageCode::auto(), &LanguageCode::english())
            .await;
        assert!(matches!(result, Err(Error::Translation(_))));
    }
}
