//! Request orchestration
//!
//! `ChatPipeline` composes the translation adapter, relevance gate, LLM
//! gateway, response formatter and speech backends into the flows the
//! HTTP layer exposes.
//!
//! Ordering invariant: translation to English always precedes relevance
//! classification and the LLM call, so neither ever sees non-English
//! text. Re-translation to the request language happens only after
//! formatting succeeds.

use std::sync::Arc;

use obaatanpa_core::{
    AudioTranscoder, Error, GenerateOutcome, GenerateReply, LanguageCode, LanguageModel,
    SpeechToText, TextToSpeech, Translator,
};
use obaatanpa_text_processing::{RelevanceFilter, ResponseFormatter};

use crate::PipelineError;

/// Reply to a `chat` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    pub language: LanguageCode,
    pub show_icons: bool,
}

/// Reply to `regenerate` / `continue` requests (always English)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub reply: String,
    pub show_icons: bool,
}

/// Stateless per-request pipeline over the external-service adapters.
///
/// Shared immutably across requests; every operation is a single pass
/// with sequential awaited calls and no retries.
pub struct ChatPipeline {
    llm: Arc<dyn LanguageModel>,
    translator: Arc<dyn Translator>,
    tts: Arc<dyn TextToSpeech>,
    stt: Arc<dyn SpeechToText>,
    transcoder: Arc<dyn AudioTranscoder>,
    relevance: RelevanceFilter,
    formatter: ResponseFormatter,
}

impl ChatPipeline {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        translator: Arc<dyn Translator>,
        tts: Arc<dyn TextToSpeech>,
        stt: Arc<dyn SpeechToText>,
        transcoder: Arc<dyn AudioTranscoder>,
    ) -> Self {
        Self {
            llm,
            translator,
            tts,
            stt,
            transcoder,
            relevance: RelevanceFilter::new(),
            formatter: ResponseFormatter::new(),
        }
    }

    /// Replace the relevance pattern table (per-deployment tuning)
    pub fn with_relevance_filter(mut self, relevance: RelevanceFilter) -> Self {
        self.relevance = relevance;
        self
    }

    /// Answer a user question, translating to and from English as needed.
    ///
    /// The relevance gate runs on the English text and rejects before any
    /// LLM call is made.
    pub async fn chat(
        &self,
        message: &str,
        language: &LanguageCode,
    ) -> Result<ChatReply, PipelineError> {
        let english = LanguageCode::english();

        let english_input = if language.is_english() {
            message.to_string()
        } else {
            self.translator
                .translate(message, language, &english)
                .await
                .map_err(translation_error)?
        };

        if !self.relevance.is_relevant(&english_input) {
            tracing::info!(language = %language, "question rejected by relevance gate");
            return Err(PipelineError::IrrelevantQuestion);
        }

        let reply = self.generate(&english_input).await?;
        let formatted = self.formatter.format(&reply.text);

        let final_text = if language.is_english() {
            formatted
        } else {
            self.translator
                .translate(&formatted, &english, language)
                .await
                .map_err(translation_error)?
        };

        Ok(ChatReply {
            reply: final_text,
            language: language.clone(),
            show_icons: reply.show_icons,
        })
    }

    /// Regenerate an answer. Input and output are always English; the
    /// relevance gate and formatting mirror `chat`.
    pub async fn regenerate(&self, message: &str) -> Result<Reply, PipelineError> {
        if !self.relevance.is_relevant(message) {
            return Err(PipelineError::IrrelevantQuestion);
        }

        let reply = self.generate(message).await?;
        Ok(Reply {
            reply: self.formatter.format(&reply.text),
            show_icons: false,
        })
    }

    /// Continue a prior response.
    ///
    /// No relevance gate: the prior text already passed it. The result is
    /// the prior text and the formatted continuation joined by a line
    /// break. `conversation_id` is accepted for the caller's benefit and
    /// otherwise unused.
    pub async fn continue_response(
        &self,
        last_response: &str,
        conversation_id: Option<&str>,
    ) -> Result<Reply, PipelineError> {
        if let Some(id) = conversation_id {
            tracing::debug!(conversation_id = %id, "continuation requested");
        }

        let prompt = format!("Please continue the following response: {}", last_response);
        let reply = self.generate(&prompt).await?;
        let continuation = self.formatter.format(&reply.text);

        Ok(Reply {
            reply: format!("{}\n{}", last_response, continuation),
            show_icons: false,
        })
    }

    /// Thin pass-through to the translation adapter.
    pub async fn translate(
        &self,
        text: &str,
        src: &LanguageCode,
        dest: &LanguageCode,
    ) -> Result<String, PipelineError> {
        self.translator
            .translate(text, src, dest)
            .await
            .map_err(translation_error)
    }

    /// Synthesize speech, remapping locale codes the TTS backend does not
    /// support (`ak` -> `en-US`).
    pub async fn speak(
        &self,
        text: &str,
        lang: &LanguageCode,
    ) -> Result<Vec<u8>, PipelineError> {
        let lang = remap_tts_language(lang);
        self.tts.synthesize(text, &lang).await.map_err(|e| {
            tracing::error!(error = %e, "speech synthesis failed");
            PipelineError::Synthesis(e.to_string())
        })
    }

    /// Transcribe uploaded WebM audio.
    ///
    /// Recognition always runs in English; when the caller asked for
    /// Akan the transcript is translated afterwards.
    pub async fn transcribe(
        &self,
        audio: &[u8],
        language: &LanguageCode,
    ) -> Result<String, PipelineError> {
        let wav = self.transcoder.to_wav(audio).await.map_err(|e| {
            tracing::error!(error = %e, "audio conversion failed");
            PipelineError::Audio(e.to_string())
        })?;

        let english = LanguageCode::english();
        let text = self
            .stt
            .transcribe(&wav, &english)
            .await
            .map_err(|e| match e {
                Error::UnintelligibleAudio => PipelineError::UnintelligibleAudio,
                Error::SttService(detail) => PipelineError::SttService(detail),
                other => {
                    tracing::error!(error = %other, "transcription failed");
                    PipelineError::Audio(other.to_string())
                }
            })?;

        if language.is_akan() {
            return self
                .translator
                .translate(&text, &english, language)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "transcript translation failed");
                    PipelineError::Audio(e.to_string())
                });
        }

        Ok(text)
    }

    async fn generate(&self, prompt: &str) -> Result<GenerateReply, PipelineError> {
        let outcome = self.llm.query(prompt).await.map_err(|e| {
            tracing::error!(error = %e, model = self.llm.model_name(), "language model call failed");
            PipelineError::Processing(e.to_string())
        })?;

        match outcome {
            GenerateOutcome::Reply(reply) => Ok(reply),
            GenerateOutcome::ApiFailure { status, message } => {
                tracing::warn!(status, "language model API failure");
                Err(PipelineError::LlmService { status, message })
            }
        }
    }
}

/// Locale remap for the TTS backend, which has no Akan voice; the closest
/// regionally available code is used instead.
fn remap_tts_language(lang: &LanguageCode) -> LanguageCode {
    if lang.is_akan() {
        LanguageCode::new("en-US")
    } else {
        lang.clone()
    }
}

fn translation_error(err: Error) -> PipelineError {
    tracing::error!(error = %err, "translation failed");
    PipelineError::Translation(err.to_string())
}
