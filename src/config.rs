//! Configuration management for the voxbridge relay

use crate::{Error, Result};

/// Default Gemini model when `GEMINI_MODEL` is unset
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Relay configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key (from `GEMINI_API_KEY`)
    pub gemini_api_key: String,

    /// Gemini model identifier for generation
    pub gemini_model: String,

    /// Google Cloud Text-to-Speech API key (from `GOOGLE_TTS_API_KEY`)
    pub tts_api_key: String,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a required credential is absent. Missing
    /// credentials are a startup failure, never a per-request one.
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = require_env("GEMINI_API_KEY")?;
        let tts_api_key = require_env("GOOGLE_TTS_API_KEY")?;

        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            gemini_api_key,
            gemini_model,
            tts_api_key,
        })
    }
}

/// Read a required environment variable, rejecting empty values
fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{name} not set"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_env_rejects_missing() {
        assert!(require_env("VOXBRIDGE_TEST_UNSET_VAR").is_err());
    }

    #[test]
    fn require_env_rejects_blank() {
        // SAFETY: test-only env mutation, variable name is unique to this test
        unsafe { std::env::set_var("VOXBRIDGE_TEST_BLANK_VAR", "  ") };
        assert!(require_env("VOXBRIDGE_TEST_BLANK_VAR").is_err());
    }

    #[test]
    fn require_env_accepts_value() {
        unsafe { std::env::set_var("VOXBRIDGE_TEST_SET_VAR", "abc123") };
        assert_eq!(require_env("VOXBRIDGE_TEST_SET_VAR").unwrap(), "abc123");
    }
}
