//! Anthropic Messages API gateway
//!
//! Implements the `LanguageModel` trait against `POST /v1/messages`.
//! Every request carries the fixed medical persona and the configured
//! token cap. Non-success HTTP statuses become `GenerateOutcome::ApiFailure`
//! so that callers branch on them explicitly instead of catching errors.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use obaatanpa_core::{GenerateOutcome, GenerateReply, GenerateRequest, LanguageModel, Result};

use crate::persona::MEDICAL_PERSONA;
use crate::LlmError;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Configuration for the Claude gateway
#[derive(Debug, Clone)]
pub struct ClaudeConfig {
    /// API key
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// API endpoint (overridable for tests or a proxy)
    pub endpoint: String,
    /// Token cap applied to every request
    pub max_tokens: u32,
    /// System persona injected into every request
    pub persona: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "claude-3-5-sonnet-20240620".to_string(),
            endpoint: "https://api.anthropic.com".to_string(),
            max_tokens: 200,
            persona: MEDICAL_PERSONA.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClaudeConfig {
    /// Create config with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[derive(Debug, Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    system: &'a str,
    max_tokens: u32,
    messages: Vec<ClaudeMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClaudeApiResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    /// Remaining envelope keys. Only inspected for the (vestigial)
    /// `retry`/`edit` icon condition the frontend contract exposes.
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

impl ClaudeApiResponse {
    fn into_reply(self) -> GenerateReply {
        let text = self
            .content
            .iter()
            .find(|block| block.kind == "text")
            .or_else(|| self.content.first())
            .map(|block| block.text.clone())
            .unwrap_or_default();

        let show_icons = self.extra.contains_key("retry") || self.extra.contains_key("edit");

        GenerateReply { text, show_icons }
    }
}

/// Gateway to the Anthropic Messages API
pub struct ClaudeGateway {
    config: ClaudeConfig,
    client: Client,
}

impl ClaudeGateway {
    /// Create a new gateway.
    ///
    /// Fails when the API key is missing or the HTTP client cannot be
    /// built; never panics.
    pub fn new(config: ClaudeConfig) -> std::result::Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::Configuration(
                "API key not set. Provide llm.api_key or ANTHROPIC_API_KEY.".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn execute(&self, request: &GenerateRequest) -> std::result::Result<GenerateOutcome, LlmError> {
        let wire_request = ClaudeRequest {
            model: &self.config.model,
            system: &request.system,
            max_tokens: request.max_tokens,
            messages: vec![ClaudeMessage {
                role: "user",
                content: &request.prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.endpoint))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&wire_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "language model API failure");
            // Message shape matches what the frontend surfaces verbatim.
            return Ok(GenerateOutcome::ApiFailure {
                status: status.as_u16(),
                message: format!("Error: {} - {}", status.as_u16(), body),
            });
        }

        let body: ClaudeApiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(GenerateOutcome::Reply(body.into_reply()))
    }
}

#[async_trait]
impl LanguageModel for ClaudeGateway {
    async fn query(&self, prompt: &str) -> Result<GenerateOutcome> {
        // Built fresh per call; immutable.
        let request = GenerateRequest::new(self.config.persona.clone(), prompt)
            .with_max_tokens(self.config.max_tokens);

        let outcome = self.execute(&request).await?;
        Ok(outcome)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        let result = ClaudeGateway::new(ClaudeConfig::default());
        assert!(matches!(result, Err(LlmError::Configuration(_))));
    }

    #[test]
    fn test_request_wire_shape() {
        let request = ClaudeRequest {
            model: "claude-3-5-sonnet-20240620",
            system: MEDICAL_PERSONA,
            max_tokens: 200,
            messages: vec![ClaudeMessage {
                role: "user",
                content: "What are symptoms of preeclampsia?",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "claude-3-5-sonnet-20240620");
        assert_eq!(json["max_tokens"], 200);
        assert_eq!(json["messages"][0]["role"], "user");
        assert!(json["system"].as_str().unwrap().contains("medical doctor"));
    }

    #[test]
    fn test_parses_first_text_block() {
        let body: ClaudeApiResponse = serde_json::from_str(
            r#"{
                "id": "msg_01",
                "content": [{"type": "text", "text": "Rest and stay hydrated."}],
                "model": "claude-3-5-sonnet-20240620",
                "stop_reason": "end_turn"
            }"#,
        )
        .unwrap();

        let reply = body.into_reply();
        assert_eq!(reply.text, "Rest and stay hydrated.");
        assert!(!reply.show_icons);
    }

    #[test]
    fn test_empty_content_yields_empty_text() {
        let body: ClaudeApiResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        let reply = body.into_reply();
        assert_eq!(reply.text, "");
    }

    #[test]
    fn test_show_icons_requires_retry_or_edit_keys() {
        // The documented API never returns these keys; the flag exists
        // because the frontend contract exposes it.
        let with_retry: ClaudeApiResponse =
            serde_json::from_str(r#"{"content": [{"type": "text", "text": "hi"}], "retry": true}"#)
                .unwrap();
        assert!(with_retry.into_reply().show_icons);

        let with_edit: ClaudeApiResponse =
            serde_json::from_str(r#"{"content": [{"type": "text", "text": "hi"}], "edit": {}}"#)
                .unwrap();
        assert!(with_edit.into_reply().show_icons);

        let plain: ClaudeApiResponse =
            serde_json::from_str(r#"{"content": [{"type": "text", "text": "hi"}]}"#).unwrap();
        assert!(!plain.into_reply().show_icons);
    }
}
