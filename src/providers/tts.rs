//! Google Cloud Text-to-Speech client

use crate::{Error, Result};

use super::UPSTREAM_TIMEOUT;

const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";

/// Target voice: Brazilian Portuguese, female, MP3 output
const LANGUAGE_CODE: &str = "pt-BR";
const SSML_GENDER: &str = "FEMALE";
const AUDIO_ENCODING: &str = "MP3";

/// Synthesizes speech from text
pub struct SpeechSynthesizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SpeechSynthesizer {
    /// Create a new synthesizer
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or the HTTP client cannot be
    /// built
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a synthesizer against a non-default API endpoint (used in tests)
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or the HTTP client cannot be
    /// built
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "Google Cloud API key required for TTS".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::builder().timeout(UPSTREAM_TIMEOUT).build()?,
            api_key,
            base_url,
        })
    }

    /// Synthesize text to speech
    ///
    /// # Returns
    ///
    /// Base64-encoded MP3 audio, as produced by the provider
    ///
    /// # Errors
    ///
    /// Returns `Error::Synthesis` if the call fails, `Error::Timeout` if the
    /// deadline elapses
    pub async fn synthesize(&self, text: &str) -> Result<String> {
        #[derive(serde::Serialize)]
        struct SynthesizeRequest<'a> {
            input: Input<'a>,
            voice: Voice<'a>,
            #[serde(rename = "audioConfig")]
            audio_config: AudioConfig<'a>,
        }

        #[derive(serde::Serialize)]
        struct Input<'a> {
            text: &'a str,
        }

        #[derive(serde::Serialize)]
        struct Voice<'a> {
            #[serde(rename = "languageCode")]
            language_code: &'a str,
            #[serde(rename = "ssmlGender")]
            ssml_gender: &'a str,
        }

        #[derive(serde::Serialize)]
        struct AudioConfig<'a> {
            #[serde(rename = "audioEncoding")]
            audio_encoding: &'a str,
        }

        #[derive(serde::Deserialize)]
        struct SynthesizeResponse {
            #[serde(rename = "audioContent")]
            audio_content: String,
        }

        tracing::debug!(text_chars = text.len(), "starting synthesis");

        let request = SynthesizeRequest {
            input: Input { text },
            voice: Voice {
                language_code: LANGUAGE_CODE,
                ssml_gender: SSML_GENDER,
            },
            audio_config: AudioConfig {
                audio_encoding: AUDIO_ENCODING,
            },
        };

        let response = self
            .client
            .post(format!("{}/v1/text:synthesize", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        tracing::debug!(status = %status, "received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "TTS API error");
            return Err(Error::Synthesis(format!("TTS API error {status}: {body}")));
        }

        let result: SynthesizeResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse TTS response");
            Error::Synthesis(format!("unparseable TTS response: {e}"))
        })?;

        tracing::info!(audio_chars = result.audio_content.len(), "synthesis complete");
        Ok(result.audio_content)
    }
}

/// Map a transport failure, keeping timeouts distinguishable
fn map_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(format!("TTS request timed out: {e}"))
    } else {
        Error::Synthesis(format!("TTS request failed: {e}"))
    }
}
