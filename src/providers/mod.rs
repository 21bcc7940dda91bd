//! Upstream provider clients
//!
//! One reqwest-backed client per Google service, constructed once at startup
//! and shared read-only across requests.

pub mod gemini;
pub mod tts;

pub use gemini::GeminiClient;
pub use tts::SpeechSynthesizer;

/// Bound applied to every upstream call so a hung provider cannot block a
/// request forever
pub(crate) const UPSTREAM_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);
