//! Language code handling
//!
//! The relay works with ISO-639-style codes rather than a closed language
//! enum: the translation service accepts arbitrary pairs and `/translate`
//! passes caller-supplied codes straight through. `auto` is a legal source
//! code meaning "detect".

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized (lowercased, trimmed) language code such as `en`, `ak`
/// or `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Create a code, normalizing case and surrounding whitespace.
    ///
    /// Region subtags keep their conventional casing (`en-US`).
    pub fn new(code: impl AsRef<str>) -> Self {
        let code = code.as_ref().trim();
        match code.split_once('-') {
            Some((lang, region)) => Self(format!(
                "{}-{}",
                lang.to_ascii_lowercase(),
                region.to_ascii_uppercase()
            )),
            None => Self(code.to_ascii_lowercase()),
        }
    }

    /// English, the pivot language for classification and LLM calls
    pub fn english() -> Self {
        Self("en".to_string())
    }

    /// Akan, the default request language
    pub fn akan() -> Self {
        Self("ak".to_string())
    }

    /// Pseudo-code accepted by the translation service as "detect source"
    pub fn auto() -> Self {
        Self("auto".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_english(&self) -> bool {
        self.0 == "en"
    }

    pub fn is_akan(&self) -> bool {
        self.0 == "ak"
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}
