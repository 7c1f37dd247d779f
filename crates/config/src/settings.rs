//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Language model gateway configuration
    #[serde(default)]
    pub llm: LlmSettings,

    /// Translation service configuration
    #[serde(default)]
    pub translation: TranslationSettings,

    /// Speech (TTS/STT) service configuration
    #[serde(default)]
    pub speech: SpeechSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS origin checking (disable only for development)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Language model gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// API key. Falls back to `ANTHROPIC_API_KEY` when empty.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API endpoint (overridable for tests and proxies)
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// Token cap applied to every request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "claude-3-5-sonnet-20240620".to_string()
}

fn default_llm_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_max_tokens() -> u32 {
    200
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            endpoint: default_llm_endpoint(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmSettings {
    /// Resolve the API key, preferring the config value over the
    /// conventional environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        if !self.api_key.is_empty() {
            return Some(self.api_key.clone());
        }
        std::env::var("ANTHROPIC_API_KEY").ok().filter(|k| !k.is_empty())
    }
}

/// Translation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationSettings {
    /// Base URL of the translation service
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Language assumed for incoming chat requests that omit one
    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_translation_endpoint() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_language() -> String {
    "ak".to_string()
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            endpoint: default_translation_endpoint(),
            timeout_secs: default_timeout_secs(),
            default_language: default_language(),
        }
    }
}

/// Speech service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    /// Base URL of the TTS service
    #[serde(default = "default_tts_endpoint")]
    pub tts_endpoint: String,

    /// Base URL of the STT service
    #[serde(default = "default_stt_endpoint")]
    pub stt_endpoint: String,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_tts_endpoint() -> String {
    "http://127.0.0.1:8091".to_string()
}

fn default_stt_endpoint() -> String {
    "http://127.0.0.1:8090".to_string()
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            tts_endpoint: default_tts_endpoint(),
            stt_endpoint: default_stt_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.llm.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.max_tokens".to_string(),
                message: "token cap must be non-zero".to_string(),
            });
        }

        for (field, value) in [
            ("llm.endpoint", &self.llm.endpoint),
            ("translation.endpoint", &self.translation.endpoint),
            ("speech.tts_endpoint", &self.speech.tts_endpoint),
            ("speech.stt_endpoint", &self.speech.stt_endpoint),
        ] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("expected an http(s) URL, got '{}'", value),
                });
            }
        }

        if self.translation.default_language.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "translation.default_language".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load settings from files and environment.
///
/// Priority: env vars > `config/{env}.toml` > `config/default.toml` > defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder().add_source(File::with_name("config/default").required(false));

    if let Some(env) = env {
        builder = builder.add_source(File::with_name(&format!("config/{}", env)).required(false));
    }

    let config = builder
        .add_source(Environment::with_prefix("OBAATANPA").separator("__"))
        .build()?;

    let settings: Settings = config.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
