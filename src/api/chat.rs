//! The four relay endpoints
//!
//! Each handler is a short deterministic pipeline: validate, ingest (when a
//! file is present), build the Gemini message, call upstream(s), shape the
//! JSON response. The first failure ends the request; validation failures
//! never reach an upstream.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::ingest::{self, MediaPayload};
use crate::message::Content;
use crate::{Error, Result};

use super::ApiState;

/// Text-only chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: String,
}

/// Reply envelope for `/chat` and `/chat-image`
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Reply envelope for `/chat-audio`
///
/// The key intentionally differs from the other chat routes; the deployed
/// mobile client reads `text` here.
#[derive(Debug, Serialize)]
pub struct TranscriptReply {
    pub text: String,
}

/// Text-to-speech request
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: String,
}

/// Reply envelope for `/chat-tts`: the generated reply plus its audio
#[derive(Debug, Serialize)]
pub struct TtsReply {
    #[serde(rename = "audioBase64")]
    pub audio_base64: String,
    pub text: String,
}

/// POST /chat - text-only chat
pub async fn chat(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> std::result::Result<Json<ChatReply>, ApiError> {
    if request.prompt.trim().is_empty() {
        return Err(validation("Campo \"prompt\" é obrigatório"));
    }

    let reply = state.gemini.generate(Content::text(&request.prompt)).await?;
    Ok(Json(ChatReply { reply }))
}

/// POST /chat-image - image plus optional prompt
pub async fn chat_image(
    State(state): State<ApiState>,
    multipart: Multipart,
) -> std::result::Result<Json<ChatReply>, ApiError> {
    let (media, prompt) = read_upload(multipart, "image").await?;
    let media = media.ok_or_else(|| validation("Campo \"image\" é obrigatório"))?;

    let reply = state
        .gemini
        .generate(Content::with_media(&media, prompt.as_deref().unwrap_or("")))
        .await?;
    Ok(Json(ChatReply { reply }))
}

/// POST /chat-audio - audio transcription
///
/// Caller-supplied prompt fields are ignored; the message always carries the
/// fixed transcription instruction.
pub async fn chat_audio(
    State(state): State<ApiState>,
    multipart: Multipart,
) -> std::result::Result<Json<TranscriptReply>, ApiError> {
    let (media, _) = read_upload(multipart, "audio").await?;
    let media = media.ok_or_else(|| validation("Campo \"audio\" é obrigatório"))?;

    let text = state.gemini.generate(Content::transcription(&media)).await?;
    Ok(Json(TranscriptReply { text }))
}

/// POST /chat-tts - generate a reply, then speak it
///
/// Generation runs on the caller's text; synthesis runs on the generated
/// reply, never on the raw input.
pub async fn chat_tts(
    State(state): State<ApiState>,
    Json(request): Json<TtsRequest>,
) -> std::result::Result<Json<TtsReply>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(validation("Campo \"text\" é obrigatório"));
    }

    let reply = state.gemini.generate(Content::text(&request.text)).await?;
    let audio_base64 = state.tts.synthesize(&reply).await?;

    Ok(Json(TtsReply {
        audio_base64,
        text: reply,
    }))
}

/// Walk the multipart stream, ingesting the named file field and collecting
/// an optional `prompt` text field
///
/// Unknown fields are skipped. Returns before any upstream call is made.
async fn read_upload(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<(Option<MediaPayload>, Option<String>)> {
    let mut media = None;
    let mut prompt = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Upload inválido: {e}")))?
    {
        match field.name() {
            Some(name) if name == file_field => {
                media = Some(ingest::ingest_field(field).await?);
            }
            Some("prompt") => {
                prompt = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| Error::Validation(format!("Upload inválido: {e}")))?,
                );
            }
            _ => {}
        }
    }

    Ok((media, prompt))
}

fn validation(message: &str) -> ApiError {
    ApiError(Error::Validation(message.to_string()))
}

/// Maps relay errors onto the HTTP contract: validation failures are 400,
/// upstream failures are 500, both with a flat `{"error": ...}` body
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody {
            error: String,
        }

        let status = match self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        (status, Json(ErrorBody {
            error: self.0.to_string(),
        }))
            .into_response()
    }
}
