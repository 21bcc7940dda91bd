//! Gemini message construction
//!
//! Builds the ordered multi-part `contents` entries the `generateContent`
//! API expects, from plain text and/or an ingested media payload.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::ingest::MediaPayload;

/// Fixed instruction sent alongside audio uploads. The audio route never
/// forwards caller-supplied prompts.
pub const TRANSCRIBE_INSTRUCTION: &str = "Transcreva o conteúdo deste áudio.";

/// A single user message in Gemini wire format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

/// One part of a message: plain text or inline binary data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64-encoded binary content plus its MIME type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

impl Content {
    /// Build a single-part text message
    #[must_use]
    pub fn text(prompt: &str) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::Text {
                text: prompt.to_string(),
            }],
        }
    }

    /// Build a two-part media message: inline data first, then the prompt
    /// text (empty string when the caller supplied none)
    #[must_use]
    pub fn with_media(media: &MediaPayload, prompt: &str) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![inline_part(media), Part::Text {
                text: prompt.to_string(),
            }],
        }
    }

    /// Build the audio-transcription message: inline data followed by the
    /// fixed instruction
    #[must_use]
    pub fn transcription(media: &MediaPayload) -> Self {
        Self::with_media(media, TRANSCRIBE_INSTRUCTION)
    }
}

/// Encode a media payload as an inline-data part
fn inline_part(media: &MediaPayload) -> Part {
    Part::InlineData {
        inline_data: InlineData {
            mime_type: media.mime_type.clone(),
            data: STANDARD.encode(&media.bytes),
        },
    }
}
