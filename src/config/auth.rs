//! Authentication configuration
//!
//! Access tokens are issued by the identity provider and signed with a
//! shared HS256 secret; this service only validates them.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// Expected `iss` claim
    pub issuer: String,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,

    pub jwt_secret: Secret<String>,
}

impl AuthConfig {
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }

        if *environment == Environment::Production {
            if !self.issuer.starts_with("https://") {
                return Err(ValidationError::IssuerMustBeHttps);
            }
            if secret.len() < MIN_PRODUCTION_SECRET_BYTES {
                return Err(ValidationError::WeakJwtSecret);
            }
        }
        Ok(())
    }
}

fn default_audience() -> String {
    "omni-coach".to_string()
}
