//! Encryption adapters.
//!
//! - `ChaChaSecretCipher` - ChaCha20-Poly1305 for OAuth tokens at rest

mod chacha;

pub use chacha::ChaChaSecretCipher;
