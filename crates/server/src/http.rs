//! HTTP Endpoints
//!
//! REST API for the maternal-health chat relay. Response shapes are fixed
//! contracts with the web client: chat-style failures come back as a
//! `reply` the client can render in the conversation, while caller
//! mistakes come back as an `error`.

use axum::{
    extract::{Json, Multipart, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use obaatanpa_config::ServerConfig;
use obaatanpa_core::LanguageCode;
use obaatanpa_pipeline::PipelineError;

use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let cors_layer = build_cors_layer(&server.cors_origins, server.cors_enabled);

    Router::new()
        .route("/chat", post(chat))
        .route("/regenerate", post(regenerate))
        .route("/continue", post(continue_response))
        .route("/translate", post(translate))
        .route("/speak", post(speak))
        .route("/transcribe_audio", post(transcribe_audio))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// CORS policy for the browser frontend.
///
/// The API carries no cookies or credentials, so the policy is origin
/// allow-listing only. Disabled -> permissive (development); no usable
/// origins configured -> the local dev frontend.
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    if !enabled {
        tracing::warn!("CORS checking disabled, allowing any origin");
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        tracing::info!("no usable CORS origins configured, allowing http://localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods(methods)
            .allow_headers(Any);
    }

    tracing::info!(count = parsed.len(), "CORS origins configured");
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(methods)
        .allow_headers(Any)
}

fn status_of(err: &PipelineError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Chat request
#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<String>,
    language: Option<String>,
}

/// Chat response
#[derive(Debug, Serialize)]
struct ChatResponse {
    reply: String,
    language: String,
    show_icons: bool,
}

/// Chat endpoint
///
/// Caller mistakes (missing message, off-topic question) come back as an
/// `error`; downstream failures come back as a renderable `reply`, both
/// carrying the request language so the client keeps its locale state.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let language = request
        .language
        .map(LanguageCode::new)
        .unwrap_or_else(|| state.default_language.clone());

    let message = match request.message {
        Some(message) => message,
        None => return chat_error(PipelineError::MissingInput("message"), &language),
    };

    match state.pipeline.chat(&message, &language).await {
        Ok(reply) => Json(ChatResponse {
            reply: reply.reply,
            language: reply.language.to_string(),
            show_icons: reply.show_icons,
        })
        .into_response(),
        Err(err) => chat_error(err, &language),
    }
}

fn chat_error(err: PipelineError, language: &LanguageCode) -> Response {
    let status = status_of(&err);
    let body = if status.is_client_error() {
        serde_json::json!({
            "error": err.to_string(),
            "language": language.as_str(),
            "show_icons": false,
        })
    } else {
        serde_json::json!({
            "reply": err.to_string(),
            "language": language.as_str(),
            "show_icons": false,
        })
    };
    (status, Json(body)).into_response()
}

/// Regenerate request (always English)
#[derive(Debug, Deserialize)]
struct RegenerateRequest {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReplyResponse {
    reply: String,
    show_icons: bool,
}

/// Regenerate endpoint
async fn regenerate(
    State(state): State<AppState>,
    Json(request): Json<RegenerateRequest>,
) -> Response {
    let message = match request.message {
        Some(message) => message,
        None => return reply_error(PipelineError::MissingInput("message")),
    };

    match state.pipeline.regenerate(&message).await {
        Ok(reply) => Json(ReplyResponse {
            reply: reply.reply,
            show_icons: reply.show_icons,
        })
        .into_response(),
        Err(err) => reply_error(err),
    }
}

fn reply_error(err: PipelineError) -> Response {
    let status = status_of(&err);
    let body = if status.is_client_error() {
        serde_json::json!({ "error": err.to_string(), "show_icons": false })
    } else {
        serde_json::json!({ "reply": err.to_string(), "show_icons": false })
    };
    (status, Json(body)).into_response()
}

/// Continuation request
#[derive(Debug, Deserialize)]
struct ContinueRequest {
    text: Option<String>,
    conversation_id: Option<String>,
}

/// Continue endpoint
async fn continue_response(
    State(state): State<AppState>,
    Json(request): Json<ContinueRequest>,
) -> Response {
    let text = match request.text {
        Some(text) => text,
        None => return reply_error(PipelineError::MissingInput("text")),
    };

    match state
        .pipeline
        .continue_response(&text, request.conversation_id.as_deref())
        .await
    {
        Ok(reply) => Json(ReplyResponse {
            reply: reply.reply,
            show_icons: reply.show_icons,
        })
        .into_response(),
        Err(err) => reply_error(err),
    }
}

/// Translation request
#[derive(Debug, Deserialize)]
struct TranslateRequest {
    text: Option<String>,
    src_lang: Option<String>,
    dest_lang: Option<String>,
}

#[derive(Debug, Serialize)]
struct TranslateResponse {
    translated_text: String,
}

/// Translate endpoint
async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Response {
    let text = match request.text {
        Some(text) => text,
        None => return plain_error(PipelineError::MissingInput("text")),
    };
    let src = request
        .src_lang
        .map(LanguageCode::new)
        .unwrap_or_else(LanguageCode::auto);
    let dest = request
        .dest_lang
        .map(LanguageCode::new)
        .unwrap_or_else(LanguageCode::english);

    match state.pipeline.translate(&text, &src, &dest).await {
        Ok(translated_text) => Json(TranslateResponse { translated_text }).into_response(),
        Err(err) => plain_error(err),
    }
}

fn plain_error(err: PipelineError) -> Response {
    let status = status_of(&err);
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

/// Speech synthesis request
#[derive(Debug, Deserialize)]
struct SpeakRequest {
    text: Option<String>,
    lang: Option<String>,
}

/// Speak endpoint, returns MP3 bytes
async fn speak(State(state): State<AppState>, Json(request): Json<SpeakRequest>) -> Response {
    let text = match request.text {
        Some(text) => text,
        None => return plain_error(PipelineError::MissingInput("text")),
    };
    let lang = request
        .lang
        .map(LanguageCode::new)
        .unwrap_or_else(LanguageCode::english);

    match state.pipeline.speak(&text, &lang).await {
        Ok(audio) => ([(header::CONTENT_TYPE, "audio/mp3")], audio).into_response(),
        Err(err) => plain_error(err),
    }
}

#[derive(Debug, Serialize)]
struct TranscribeResponse {
    text: String,
}

/// Transcription endpoint
///
/// Expects a multipart form with an `audio` file part (WebM) and an
/// optional `language` text part.
async fn transcribe_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut audio: Option<Vec<u8>> = None;
    let mut language = LanguageCode::english();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "malformed multipart upload");
                return plain_error(PipelineError::MissingInput("audio file"));
            }
        };

        match field.name() {
            Some("audio") => match field.bytes().await {
                Ok(bytes) => audio = Some(bytes.to_vec()),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read audio part");
                    return plain_error(PipelineError::Audio(e.to_string()));
                }
            },
            Some("language") => {
                if let Ok(value) = field.text().await {
                    language = LanguageCode::new(value);
                }
            }
            _ => {}
        }
    }

    let audio = match audio {
        Some(audio) => audio,
        None => return plain_error(PipelineError::MissingInput("audio file")),
    };

    match state.pipeline.transcribe(&audio, &language).await {
        Ok(text) => Json(TranscribeResponse { text }).into_response(),
        Err(err) => plain_error(err),
    }
}

/// Health check
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    use obaatanpa_core::{
        AudioTranscoder, GenerateOutcome, LanguageModel, Result, SpeechToText, TextToSpeech,
        Translator,
    };
    use obaatanpa_pipeline::ChatPipeline;

    struct FixedLlm;

    #[async_trait]
    impl LanguageModel for FixedLlm {
        async fn query(&self, _prompt: &str) -> Result<GenerateOutcome> {
            Ok(GenerateOutcome::reply("Drink water and rest."))
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    struct EchoTranslator;

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(
            &self,
            text: &str,
            _from: &LanguageCode,
            to: &LanguageCode,
        ) -> Result<String> {
            Ok(format!("[{}] {}", to, text))
        }

        async fn detect_language(&self, _text: &str) -> LanguageCode {
            LanguageCode::english()
        }
    }

    struct SilentTts;

    #[async_trait]
    impl TextToSpeech for SilentTts {
        async fn synthesize(&self, _text: &str, _lang: &LanguageCode) -> Result<Vec<u8>> {
            Ok(vec![0xff, 0xfb, 0x90])
        }
    }

    struct FixedStt;

    #[async_trait]
    impl SpeechToText for FixedStt {
        async fn transcribe(&self, _wav: &[u8], _lang: &LanguageCode) -> Result<String> {
            Ok("I feel dizzy".to_string())
        }
    }

    struct PassthroughTranscoder;

    #[async_trait]
    impl AudioTranscoder for PassthroughTranscoder {
        async fn to_wav(&self, audio: &[u8]) -> Result<Vec<u8>> {
            Ok(audio.to_vec())
        }
    }

    struct OverloadedLlm;

    #[async_trait]
    impl LanguageModel for OverloadedLlm {
        async fn query(&self, _prompt: &str) -> Result<GenerateOutcome> {
            Ok(GenerateOutcome::ApiFailure {
                status: 529,
                message: "Error: 529 - overloaded_error".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "overloaded"
        }
    }

    fn router_with_llm(llm: Arc<dyn LanguageModel>) -> Router {
        let pipeline = ChatPipeline::new(
            llm,
            Arc::new(EchoTranslator),
            Arc::new(SilentTts),
            Arc::new(FixedStt),
            Arc::new(PassthroughTranscoder),
        );
        let state = AppState::new(Arc::new(pipeline), LanguageCode::akan());
        create_router(state, &ServerConfig::default())
    }

    fn test_router() -> Router {
        router_with_llm(Arc::new(FixedLlm))
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_chat_success_shape() {
        let response = test_router()
            .oneshot(json_request(
                "/chat",
                serde_json::json!({
                    "message": "What are symptoms of preeclampsia?",
                    "language": "en",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["reply"], "Drink water and rest.");
        assert_eq!(body["language"], "en");
        assert_eq!(body["show_icons"], false);
    }

    #[tokio::test]
    async fn test_chat_missing_message_is_400() {
        let response = test_router()
            .oneshot(json_request("/chat", serde_json::json!({ "language": "en" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "No message provided");
        assert_eq!(body["language"], "en");
        assert_eq!(body["show_icons"], false);
    }

    #[tokio::test]
    async fn test_chat_irrelevant_question_is_400_with_language() {
        // EchoTranslator prefixes the target code, so the off-topic text
        // survives the forward leg untouched by keywords
        let response = test_router()
            .oneshot(json_request(
                "/chat",
                serde_json::json!({
                    "message": "zebras gallop across the savanna",
                    "language": "en",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(
            body["error"],
            "The question is not related to pregnancy or health problems. Please ask a relevant question."
        );
        assert_eq!(body["language"], "en");
        assert_eq!(body["show_icons"], false);
    }

    #[tokio::test]
    async fn test_chat_llm_failure_is_500_with_reply_body() {
        // downstream failures render in the conversation, so the message
        // travels under `reply`, not `error`
        let response = router_with_llm(Arc::new(OverloadedLlm))
            .oneshot(json_request(
                "/chat",
                serde_json::json!({
                    "message": "What are symptoms of preeclampsia?",
                    "language": "en",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["reply"], "Error: 529 - overloaded_error");
        assert!(body.get("error").is_none());
        assert_eq!(body["language"], "en");
        assert_eq!(body["show_icons"], false);
    }

    #[tokio::test]
    async fn test_regenerate_llm_failure_is_500_with_reply_body() {
        let response = router_with_llm(Arc::new(OverloadedLlm))
            .oneshot(json_request(
                "/regenerate",
                serde_json::json!({ "message": "how do I treat a fever" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["reply"], "Error: 529 - overloaded_error");
        assert!(body.get("error").is_none());
        assert_eq!(body["show_icons"], false);
    }

    #[tokio::test]
    async fn test_chat_defaults_to_configured_language() {
        // default language is ak; the echo translator round-trips, so the
        // reply carries the [ak] marker from back-translation
        let response = test_router()
            .oneshot(json_request(
                "/chat",
                serde_json::json!({ "message": "pregnancy question" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["language"], "ak");
        assert_eq!(body["reply"], "[ak] Drink water and rest.");
    }

    #[tokio::test]
    async fn test_regenerate_shape() {
        let response = test_router()
            .oneshot(json_request(
                "/regenerate",
                serde_json::json!({ "message": "how do I treat a fever" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["reply"], "Drink water and rest.");
        assert_eq!(body["show_icons"], false);
    }

    #[tokio::test]
    async fn test_continue_missing_text_is_400() {
        let response = test_router()
            .oneshot(json_request("/continue", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "No text provided");
    }

    #[tokio::test]
    async fn test_translate_defaults() {
        let response = test_router()
            .oneshot(json_request(
                "/translate",
                serde_json::json!({ "text": "hello" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["translated_text"], "[en] hello");
    }

    #[tokio::test]
    async fn test_translate_missing_text_is_400() {
        let response = test_router()
            .oneshot(json_request("/translate", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "No text provided");
    }

    #[tokio::test]
    async fn test_speak_returns_mp3() {
        let response = test_router()
            .oneshot(json_request(
                "/speak",
                serde_json::json!({ "text": "hello", "lang": "ak" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "audio/mp3"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.as_ref(), &[0xff, 0xfb, 0x90]);
    }

    #[tokio::test]
    async fn test_transcribe_missing_audio_is_400() {
        let boundary = "X-TEST-BOUNDARY";
        let body = format!(
            "--{boundary}\r\ncontent-disposition: form-data; name=\"language\"\r\n\r\nen\r\n--{boundary}--\r\n"
        );
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/transcribe_audio")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "No audio file provided");
    }

    #[tokio::test]
    async fn test_transcribe_translates_for_akan() {
        let boundary = "X-TEST-BOUNDARY";
        let body = format!(
            "--{boundary}\r\ncontent-disposition: form-data; name=\"audio\"; filename=\"clip.webm\"\r\ncontent-type: audio/webm\r\n\r\nwebm-bytes\r\n--{boundary}\r\ncontent-disposition: form-data; name=\"language\"\r\n\r\nak\r\n--{boundary}--\r\n"
        );
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/transcribe_audio")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["text"], "[ak] I feel dizzy");
    }
}
