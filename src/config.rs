//! Exchange configuration
//!
//! The endpoint and credential are injected at construction time, either
//! directly or from the environment (`.env` files are honoured).

use crate::{Error, Result};
use std::fmt;

/// Media type sent with every request body.
pub const JSON_MEDIA_TYPE: &str = "application/json; charset=utf-8";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Clone)]
pub struct ExchangeConfig {
    pub endpoint_url: String,
    pub api_key: String,
    pub media_type: &'static str,
}

impl ExchangeConfig {
    pub fn new(endpoint_url: String, api_key: String) -> Self {
        Self {
            endpoint_url,
            api_key,
            media_type: JSON_MEDIA_TYPE,
        }
    }

    /// Build the `generateContent` endpoint for a model.
    ///
    /// `model` may be given bare (`gemini-2.0-flash`) or as a `models/...` path.
    pub fn for_model(api_key: String, model: &str) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(model);
        Self::new(
            format!("{}/v1beta/models/{}:generateContent", DEFAULT_BASE_URL, model),
            api_key,
        )
    }

    /// Load from `GEMINI_API_KEY` plus optional `GEMINI_ENDPOINT_URL` or `GEMINI_MODEL`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY")
            .ok_or_else(|| Error::Config("GEMINI_API_KEY not set".to_string()))?;

        let config = match non_empty("GEMINI_ENDPOINT_URL") {
            Some(endpoint_url) => Self::new(endpoint_url, api_key),
            None => {
                let model = non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
                Self::for_model(api_key, &model)
            }
        };

        Ok(config)
    }
}

impl fmt::Debug for ExchangeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("api_key", &"<redacted>")
            .field("media_type", &self.media_type)
            .finish()
    }
}
