//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `OMNI_COACH` prefix and
//! nested values are separated by a double underscore.
//!
//! # Example
//!
//! ```no_run
//! use omni_coach::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod auth;
mod coaching;
mod database;
mod error;
mod google;
mod security;
mod server;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use coaching::CoachingConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use google::GoogleConfig;
pub use security::SecurityConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// Bearer token validation (HS256)
    pub auth: AuthConfig,

    /// Generative model; optional
    #[serde(default)]
    pub ai: AiConfig,

    /// Google OAuth client
    pub google: GoogleConfig,

    pub security: SecurityConfig,

    #[serde(default)]
    pub coaching: CoachingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present (development)
    /// 2. Reads variables prefixed with `OMNI_COACH`
    /// 3. Uses `__` to separate nested values
    ///
    /// - `OMNI_COACH__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `OMNI_COACH__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("OMNI_COACH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.ai.validate()?;
        self.google.validate()?;
        self.security.validate()?;
        self.coaching.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
