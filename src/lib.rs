//! Voxbridge - Multimodal chat relay between mobile clients and Google AI services
//!
//! This library provides the core functionality for the relay:
//! - Binary ingestion (multipart uploads, MIME validation, spool lifecycle)
//! - Gemini request building (text and inline-media messages)
//! - Provider clients (Gemini generation, Cloud Text-to-Speech)
//! - The four relay endpoints the mobile client talks to
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  Mobile client                       │
//! │   /chat  │  /chat-image  │  /chat-audio  │ /chat-tts│
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                  Voxbridge relay                     │
//! │   Ingestion  │  Message builder  │  Endpoints       │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │              Google AI services                      │
//! │   Gemini generateContent  │  Cloud Text-to-Speech   │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod message;
pub mod providers;

pub use config::Config;
pub use error::{Error, Result};
pub use ingest::{MAX_UPLOAD_BYTES, MediaKind, MediaPayload};
pub use message::{Content, Part};
pub use providers::{GeminiClient, SpeechSynthesizer};
