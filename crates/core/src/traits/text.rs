//! Translation and language detection trait

use async_trait::async_trait;

use crate::{LanguageCode, Result};

/// Translation interface
///
/// One external engine provides both translation and detection, so the two
/// live on the same trait.
///
/// Implementations:
/// - `HttpTranslator` - LibreTranslate-style HTTP service
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Translate text between languages.
    ///
    /// `from` may be `auto` to let the service detect the source. Failures
    /// (service unreachable, unsupported pair) propagate immediately as
    /// `Error::Translation`; there is no caching and no retry.
    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Result<String>;

    /// Detect the language of text.
    ///
    /// Best-effort: any internal failure (empty text, unreachable service,
    /// no candidates) returns `en` rather than an error. Detection failures
    /// are never fatal.
    async fn detect_language(&self, text: &str) -> LanguageCode;
}
