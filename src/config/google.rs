//! Google Calendar / Tasks OAuth client configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,

    pub client_secret: Secret<String>,

    /// Redirect URI registered for the OAuth client
    pub redirect_uri: String,

    #[serde(default = "default_oauth_base_url")]
    pub oauth_base_url: String,

    #[serde(default = "default_calendar_base_url")]
    pub calendar_base_url: String,

    #[serde(default = "default_tasks_base_url")]
    pub tasks_base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl GoogleConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.client_id.is_empty() {
            return Err(ValidationError::MissingRequired("GOOGLE__CLIENT_ID"));
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("GOOGLE__CLIENT_SECRET"));
        }
        for (name, url) in [
            ("GOOGLE__REDIRECT_URI", &self.redirect_uri),
            ("GOOGLE__OAUTH_BASE_URL", &self.oauth_base_url),
            ("GOOGLE__CALENDAR_BASE_URL", &self.calendar_base_url),
            ("GOOGLE__TASKS_BASE_URL", &self.tasks_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidUrl(name));
            }
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_oauth_base_url() -> String {
    "https://oauth2.googleapis.com".to_string()
}

fn default_calendar_base_url() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

fn default_tasks_base_url() -> String {
    "https://tasks.googleapis.com/tasks/v1".to_string()
}

fn default_timeout() -> u64 {
    15
}
