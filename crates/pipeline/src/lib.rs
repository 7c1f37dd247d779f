//! Pipeline orchestration for the maternal-health chat relay
//!
//! Composes translation, relevance filtering, the LLM gateway, response
//! formatting and the speech adapters into the request flows the server
//! exposes. Each request is stateless and single-pass; all external calls
//! are sequential awaited calls with no retries.

pub mod orchestrator;
pub mod speech;

pub use orchestrator::{ChatPipeline, ChatReply, Reply};
pub use speech::{FfmpegTranscoder, HttpSttBackend, HttpSttConfig, HttpTtsBackend, HttpTtsConfig};

use thiserror::Error;

/// User-facing pipeline errors.
///
/// The `Display` text of each variant is exactly what the HTTP layer
/// surfaces; raw downstream detail is carried in fields and logged, never
/// shown.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Relevance gate rejected the question; no LLM call was made.
    #[error("The question is not related to pregnancy or health problems. Please ask a relevant question.")]
    IrrelevantQuestion,

    #[error("No {0} provided")]
    MissingInput(&'static str),

    /// Translation service failure; message surfaced verbatim.
    #[error("{0}")]
    Translation(String),

    /// The LLM backend answered with a non-success status; its message is
    /// surfaced verbatim as the reply text.
    #[error("{message}")]
    LlmService { status: u16, message: String },

    /// Transport or envelope failure talking to the LLM backend.
    #[error("Error processing the response, please try again later.")]
    Processing(String),

    #[error("Could not understand audio")]
    UnintelligibleAudio,

    #[error("Could not request results from speech recognition service")]
    SttService(String),

    #[error("Failed to process the audio.")]
    Audio(String),

    #[error("Failed to synthesize speech")]
    Synthesis(String),
}

impl PipelineError {
    /// HTTP status the server maps this error to.
    ///
    /// 400 for caller mistakes (irrelevant question, missing input,
    /// unintelligible audio), 500 for downstream failures.
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::IrrelevantQuestion
            | PipelineError::MissingInput(_)
            | PipelineError::UnintelligibleAudio => 400,
            PipelineError::Translation(_)
            | PipelineError::LlmService { .. }
            | PipelineError::Processing(_)
            | PipelineError::SttService(_)
            | PipelineError::Audio(_)
            | PipelineError::Synthesis(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(PipelineError::IrrelevantQuestion.status_code(), 400);
        assert_eq!(PipelineError::MissingInput("message").status_code(), 400);
        assert_eq!(PipelineError::UnintelligibleAudio.status_code(), 400);
        assert_eq!(
            PipelineError::LlmService {
                status: 529,
                message: "overloaded".to_string()
            }
            .status_code(),
            500
        );
        assert_eq!(PipelineError::Translation("down".to_string()).status_code(), 500);
        assert_eq!(PipelineError::Audio("bad".to_string()).status_code(), 500);
    }

    #[test]
    fn test_processing_detail_stays_hidden() {
        let err = PipelineError::Processing("connection reset by peer".to_string());
        assert_eq!(
            err.to_string(),
            "Error processing the response, please try again later."
        );
    }
}
