//! Configuration management for the maternal-health chat relay
//!
//! Supports loading configuration from:
//! - TOML files (`config/default.toml`, `config/{env}.toml`)
//! - Environment variables (`OBAATANPA_` prefix, `__` separator)
//!
//! There is no module-level mutable state: the loaded `Settings` value is
//! passed explicitly into the pipeline at construction.

pub mod settings;

pub use settings::{
    load_settings, LlmSettings, ServerConfig, Settings, SpeechSettings, TranslationSettings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
