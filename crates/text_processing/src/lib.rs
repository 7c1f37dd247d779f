//! Text processing for the maternal-health chat relay
//!
//! - Relevance filtering (keyword-pattern gate in front of the LLM)
//! - Response formatting (paragraph/list normalization)
//! - Translation adapter (HTTP service, translate + detect)

pub mod format;
pub mod relevance;
pub mod translation;

pub use format::ResponseFormatter;
pub use relevance::{RelevanceFilter, RELEVANT_PATTERNS};
pub use translation::{HttpTranslator, HttpTranslatorConfig};
