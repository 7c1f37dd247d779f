//! Shared application state

use std::sync::Arc;

use obaatanpa_core::LanguageCode;
use obaatanpa_pipeline::ChatPipeline;

/// State shared by all request handlers.
///
/// The pipeline is stateless, so a single instance is shared across all
/// requests without locking.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ChatPipeline>,
    /// Language assumed for chat requests that omit one
    pub default_language: LanguageCode,
}

impl AppState {
    pub fn new(pipeline: Arc<ChatPipeline>, default_language: LanguageCode) -> Self {
        Self {
            pipeline,
            default_language,
        }
    }
}
