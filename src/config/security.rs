//! Encryption-at-rest configuration

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

const KEY_BYTES: usize = 32;

#[derive(Debug, Deserialize)]
pub struct SecurityConfig {
    /// Base64 of a 32-byte key sealing stored OAuth tokens
    pub token_encryption_key: Secret<String>,
}

impl SecurityConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let raw = self.token_encryption_key.expose_secret();
        if raw.is_empty() {
            return Err(ValidationError::MissingRequired("SECURITY__TOKEN_ENCRYPTION_KEY"));
        }
        match STANDARD.decode(raw.trim()) {
            Ok(key) if key.len() == KEY_BYTES => Ok(()),
            _ => Err(ValidationError::InvalidEncryptionKey),
        }
    }
}
