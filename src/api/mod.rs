//! HTTP API server for the voxbridge relay

pub mod chat;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::ingest::MAX_UPLOAD_BYTES;
use crate::providers::{GeminiClient, SpeechSynthesizer};
use crate::{Config, Result};

/// Headroom on top of the upload cap for multipart framing and the prompt
/// field
const BODY_LIMIT_OVERHEAD: usize = 64 * 1024;

/// Shared state for API handlers
///
/// Provider handles are built once at startup and reused read-only across
/// all requests; no other state crosses request boundaries.
#[derive(Clone)]
pub struct ApiState {
    pub gemini: Arc<GeminiClient>,
    pub tts: Arc<SpeechSynthesizer>,
}

impl ApiState {
    /// Build provider clients from configuration
    ///
    /// # Errors
    ///
    /// Returns error if a provider client cannot be constructed
    pub fn from_config(config: &Config) -> Result<Self> {
        let gemini = GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
        )?;
        let tts = SpeechSynthesizer::new(config.tts_api_key.clone())?;

        Ok(Self {
            gemini: Arc::new(gemini),
            tts: Arc::new(tts),
        })
    }
}

/// Build the relay router with all routes and layers
pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(chat::chat))
        .route("/chat-image", post(chat::chat_image))
        .route("/chat-audio", post(chat::chat_audio))
        .route("/chat-tts", post(chat::chat_tts))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + BODY_LIMIT_OVERHEAD))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API server
pub struct ApiServer {
    state: ApiState,
    port: u16,
}

impl ApiServer {
    /// Create a server for the given state and port
    #[must_use]
    pub fn new(state: ApiState, port: u16) -> Self {
        Self { state, port }
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if the server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(port = self.port, "relay listening");

        axum::serve(listener, router(self.state))
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}
