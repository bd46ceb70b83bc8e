//! ChaCha20-Poly1305 implementation of `SecretCipher`.
//!
//! Stored form: base64(nonce || ciphertext || tag) with a fresh random
//! 12-byte nonce per encryption.

use base64::{engine::general_purpose, Engine as _};
use chacha20poly1305::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    ChaCha20Poly1305, Key, Nonce,
};
use secrecy::{ExposeSecret, Secret};

use crate::domain::calendar::EncryptedSecret;
use crate::ports::{CipherError, SecretCipher};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

pub struct ChaChaSecretCipher {
    cipher: ChaCha20Poly1305,
}

impl ChaChaSecretCipher {
    /// Builds a cipher from a base64-encoded 32-byte key.
    ///
    /// # Errors
    ///
    /// `CipherError::InvalidKey` if the key is not base64 or not 32 bytes.
    pub fn from_base64_key(key_b64: &Secret<String>) -> Result<Self, CipherError> {
        let key_bytes = general_purpose::STANDARD
            .decode(key_b64.expose_secret().trim())
            .map_err(|e| CipherError::InvalidKey(e.to_string()))?;
        if key_bytes.len() != KEY_LEN {
            return Err(CipherError::InvalidKey(format!(
                "key must decode to {} bytes, got {}",
                KEY_LEN,
                key_bytes.len()
            )));
        }

        Ok(Self {
            cipher: ChaCha20Poly1305::new(Key::from_slice(&key_bytes)),
        })
    }
}

impl SecretCipher for ChaChaSecretCipher {
    fn encrypt(&self, plaintext: &Secret<String>) -> Result<EncryptedSecret, CipherError> {
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.expose_secret().as_bytes())
            .map_err(|_| CipherError::EncryptFailed)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(EncryptedSecret::new(general_purpose::STANDARD.encode(sealed)))
    }

    fn decrypt(&self, ciphertext: &EncryptedSecret) -> Result<Secret<String>, CipherError> {
        let decoded = general_purpose::STANDARD
            .decode(ciphertext.as_str())
            .map_err(|_| CipherError::DecryptFailed)?;
        if decoded.len() <= NONCE_LEN {
            return Err(CipherError::DecryptFailed);
        }

        let (nonce, sealed) = decoded.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| CipherError::DecryptFailed)?;

        String::from_utf8(plaintext)
            .map(Secret::new)
            .map_err(|_| CipherError::DecryptFailed)
    }
}

impl std::fmt::Debug for ChaChaSecretCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChaChaSecretCipher").finish_non_exhaustive()
    }
}
