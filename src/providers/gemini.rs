//! Gemini generateContent client

use crate::message::{Content, Part};
use crate::{Error, Result};

use super::UPSTREAM_TIMEOUT;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Request body for the generateContent endpoint
#[derive(serde::Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

/// Response from the generateContent endpoint
#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Calls the Gemini generative-language API
///
/// Each call is a fresh, independent exchange; no conversation state is
/// carried between invocations and no retries are attempted.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or the HTTP client cannot be
    /// built
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a non-default API endpoint (used in tests)
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or the HTTP client cannot be
    /// built
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "Gemini API key required for generation".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::builder().timeout(UPSTREAM_TIMEOUT).build()?,
            api_key,
            model,
            base_url,
        })
    }

    /// Generate a reply for a single user message
    ///
    /// # Errors
    ///
    /// Returns `Error::Generation` if the call fails or the response carries
    /// no text, `Error::Timeout` if the deadline elapses
    pub async fn generate(&self, content: Content) -> Result<String> {
        tracing::debug!(model = %self.model, parts = content.parts.len(), "starting generation");

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest {
                contents: vec![content],
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        tracing::debug!(status = %status, "received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Gemini API error");
            return Err(Error::Generation(format!(
                "Gemini API error {status}: {body}"
            )));
        }

        let result: GenerateResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse Gemini response");
            Error::Generation(format!("unparseable Gemini response: {e}"))
        })?;

        let text = extract_text(&result)?;
        tracing::info!(reply_chars = text.len(), "generation complete");
        Ok(text)
    }
}

/// Pull the primary textual reply out of the response structure
fn extract_text(response: &GenerateResponse) -> Result<String> {
    let content = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .ok_or_else(|| Error::Generation("Gemini response contained no candidates".to_string()))?;

    let text: String = content
        .parts
        .iter()
        .filter_map(|part| match part {
            Part::Text { text } => Some(text.as_str()),
            Part::InlineData { .. } => None,
        })
        .collect();

    if text.is_empty() {
        return Err(Error::Generation(
            "Gemini response contained no text".to_string(),
        ));
    }

    Ok(text)
}

/// Map a transport failure, keeping timeouts distinguishable
fn map_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(format!("Gemini request timed out: {e}"))
    } else {
        Error::Generation(format!("Gemini request failed: {e}"))
    }
}
