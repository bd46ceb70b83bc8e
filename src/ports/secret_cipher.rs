//! Secret Cipher Port - symmetric encryption of OAuth tokens at rest.

use secrecy::Secret;
use thiserror::Error;

use crate::domain::calendar::EncryptedSecret;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Encrypts and decrypts secrets for storage.
///
/// Encrypting the same plaintext twice must produce different ciphertexts.
pub trait SecretCipher: Send + Sync {
    fn encrypt(&self, plaintext: &Secret<String>) -> Result<EncryptedSecret, CipherError>;

    fn decrypt(&self, ciphertext: &EncryptedSecret) -> Result<Secret<String>, CipherError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("invalid encryption key: {0}")]
    InvalidKey(String),

    #[error("encryption failed")]
    EncryptFailed,

    /// Ciphertext is malformed, truncated or was sealed with another key.
    #[error("decryption failed")]
    DecryptFailed,
}

impl From<CipherError> for DomainError {
    fn from(err: CipherError) -> Self {
        DomainError::new(ErrorCode::EncryptionError, err.to_string())
    }
}
