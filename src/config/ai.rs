//! Generative model configuration
//!
//! Without an API key the service runs on the deterministic fallback path
//! only.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Deserialize)]
pub struct AiConfig {
    /// OpenAI-compatible API key
    pub api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Chat-completions base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured key, ignoring blank values.
    pub fn api_key(&self) -> Option<&Secret<String>> {
        self.api_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty())
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("AI__BASE_URL"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            temperature: default_temperature(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    20
}

fn default_retries() -> u32 {
    2
}

fn default_temperature() -> f32 {
    0.4
}
