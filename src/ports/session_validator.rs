//! Session validation port for bearer token validation.
//!
//! The identity provider issues access tokens; this port only checks them and
//! extracts the user identity. Implementations exist for HS256 JWTs and for
//! tests.
//!
//! All implementations MUST validate:
//! - **Issuer (iss)**: Token must come from the expected identity provider
//! - **Audience (aud)**: Token must be intended for this service
//! - **Expiry (exp)**: Token must not be expired

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// HTTP middleware uses this to validate Bearer tokens.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for malformed or badly signed tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::MissingSubject` when the `sub` claim is empty
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
