//! Server entry point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use obaatanpa_config::{load_settings, Settings};
use obaatanpa_core::LanguageCode;
use obaatanpa_llm::{ClaudeConfig, ClaudeGateway};
use obaatanpa_pipeline::{
    ChatPipeline, FfmpegTranscoder, HttpSttBackend, HttpSttConfig, HttpTtsBackend, HttpTtsConfig,
};
use obaatanpa_server::{create_router, AppState};
use obaatanpa_text_processing::{HttpTranslator, HttpTranslatorConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Priority: env vars > config/{env}.toml > config/default.toml > defaults
    let env = std::env::var("OBAATANPA_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => {
            // Tracing not yet initialized, use eprintln for early logging
            eprintln!(
                "Loaded configuration from files (env: {})",
                env.as_deref().unwrap_or("default")
            );
            settings
        }
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    init_tracing();

    tracing::info!("Starting Obaatanpa server v{}", env!("CARGO_PKG_VERSION"));

    settings.validate()?;

    let state = build_state(&settings)?;
    let app = create_router(state, &settings.server);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn build_state(settings: &Settings) -> Result<AppState, Box<dyn std::error::Error>> {
    let api_key = settings
        .llm
        .resolve_api_key()
        .ok_or("no LLM API key configured (set llm.api_key or ANTHROPIC_API_KEY)")?;

    let llm = ClaudeGateway::new(
        ClaudeConfig::new(api_key)
            .with_model(&settings.llm.model)
            .with_endpoint(&settings.llm.endpoint)
            .with_max_tokens(settings.llm.max_tokens),
    )?;

    let translator = HttpTranslator::new(HttpTranslatorConfig {
        endpoint: settings.translation.endpoint.clone(),
        timeout: Duration::from_secs(settings.translation.timeout_secs),
    })?;

    let tts = HttpTtsBackend::new(HttpTtsConfig {
        endpoint: settings.speech.tts_endpoint.clone(),
        timeout: Duration::from_secs(settings.speech.timeout_secs),
    })?;

    let stt = HttpSttBackend::new(HttpSttConfig {
        endpoint: settings.speech.stt_endpoint.clone(),
        timeout: Duration::from_secs(settings.speech.timeout_secs),
    })?;

    let pipeline = ChatPipeline::new(
        Arc::new(llm),
        Arc::new(translator),
        Arc::new(tts),
        Arc::new(stt),
        Arc::new(FfmpegTranscoder::new()),
    );

    tracing::info!(
        model = %settings.llm.model,
        translation_endpoint = %settings.translation.endpoint,
        default_language = %settings.translation.default_language,
        "Initialized application state"
    );

    Ok(AppState::new(
        Arc::new(pipeline),
        LanguageCode::new(&settings.translation.default_language),
    ))
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "obaatanpa=info,tower_http=debug".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
