//! Provider endpoint configuration, resolved from the environment.

use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Text model used for brand strategy and marketing content.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";

/// Image model used for logo and banner rendering.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Connection settings for the generative provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
}

impl GeminiConfig {
    /// Build a config with default endpoint and models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            text_model: DEFAULT_TEXT_MODEL.into(),
            image_model: DEFAULT_IMAGE_MODEL.into(),
        }
    }

    /// Resolve from the environment.
    ///
    /// `GEMINI_API_KEY` is required; `MEMEFORGE_BASE_URL`,
    /// `MEMEFORGE_TEXT_MODEL` and `MEMEFORGE_IMAGE_MODEL` override defaults.
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY is not set")?;
        Ok(Self {
            api_key,
            base_url: std::env::var("MEMEFORGE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            text_model: std::env::var("MEMEFORGE_TEXT_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.into()),
            image_model: std::env::var("MEMEFORGE_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.into()),
        })
    }
}
