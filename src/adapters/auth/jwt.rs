//! HS256 JWT adapter for `SessionValidator`.
//!
//! The identity provider signs access tokens with a shared secret. This
//! adapter validates:
//! - **Signature**: HS256 with the configured secret
//! - **Issuer (iss)**: Must match the configured issuer
//! - **Audience (aud)**: Must contain the configured audience
//! - **Expiry (exp)**: Must be in the future
//!
//! and maps the claims to `AuthenticatedUser`.
//!
//! # Example
//!
//! ```ignore
//! let config = JwtConfig::new("https://id.example.com", "omni-coach", secret);
//! let validator = JwtSessionValidator::new(config);
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Clock skew tolerated on `exp`.
const LEEWAY_SECS: u64 = 30;

pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    secret: Secret<String>,
}

impl JwtConfig {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>, secret: Secret<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            secret,
        }
    }
}

/// Access token claims.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AccessClaims {
    pub sub: String,
    pub iss: String,
    #[serde(default)]
    pub aud: Audience,
    pub exp: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
}

/// Audience can be a single string or array of strings in JWTs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

/// Validates HS256-signed access tokens.
pub struct JwtSessionValidator {
    issuer: String,
    audience: String,
    key: DecodingKey,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());
        Self {
            issuer: config.issuer,
            audience: config.audience,
            key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);
        validation.leeway = LEEWAY_SECS;
        validation
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = decode::<AccessClaims>(token, &self.key, &self.validation())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    tracing::warn!(error = %e, "token issued for another party");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!(error = %e, "token validation failed");
                    AuthError::InvalidToken
                }
            })?
            .claims;

        if !claims.aud.contains(&self.audience) {
            return Err(AuthError::InvalidToken);
        }

        let user_id = UserId::new(claims.sub).map_err(|_| AuthError::MissingSubject)?;

        Ok(AuthenticatedUser::new(
            user_id,
            claims.email,
            claims.name.or(claims.preferred_username),
        ))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes!";
    const ISSUER: &str = "https://id.example.com";
    const AUDIENCE: &str = "omni-coach";

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(JwtConfig::new(ISSUER, AUDIENCE, Secret::new(SECRET.to_string())))
    }

    fn claims(sub: &str, exp_offset_secs: i64) -> AccessClaims {
        AccessClaims {
            sub: sub.to_string(),
            iss: ISSUER.to_string(),
            aud: Audience::Single(AUDIENCE.to_string()),
            exp: chrono::Utc::now().timestamp() + exp_offset_secs,
            email: Some("ada@example.com".to_string()),
            name: None,
            preferred_username: Some("ada".to_string()),
        }
    }

    fn sign(claims: &AccessClaims, secret: &str) -> String {
        encode(&Header::new(Algorithm::HS256), claims, &EncodingKey::from_secret(secret.as_bytes()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let token = sign(&claims("user-1", 3600), SECRET);
        let user = validator().validate(&token).await.unwrap();

        assert_eq!(user.id.as_str(), "user-1");
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(user.display_name.as_deref(), Some("ada"));
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let token = sign(&claims("user-1", -3600), SECRET);
        assert_eq!(validator().validate(&token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn rejects_wrong_secret_issuer_and_audience() {
        let forged = sign(&claims("user-1", 3600), "another-secret-another-secret-xx");
        assert_eq!(validator().validate(&forged).await, Err(AuthError::InvalidToken));

        let mut foreign = claims("user-1", 3600);
        foreign.iss = "https://evil.example.com".into();
        assert_eq!(validator().validate(&sign(&foreign, SECRET)).await, Err(AuthError::InvalidToken));

        let mut other_aud = claims("user-1", 3600);
        other_aud.aud = Audience::Multiple(vec!["billing".into()]);
        assert_eq!(validator().validate(&sign(&other_aud, SECRET)).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn rejects_blank_subject_and_garbage() {
        let token = sign(&claims("  ", 3600), SECRET);
        assert_eq!(validator().validate(&token).await, Err(AuthError::MissingSubject));
        assert_eq!(validator().validate("not-a-jwt").await, Err(AuthError::InvalidToken));
    }

    #[test]
    fn audience_matching() {
        assert!(Audience::Single("a".into()).contains("a"));
        assert!(Audience::Multiple(vec!["a".into(), "b".into()]).contains("b"));
        assert!(!Audience::None.contains("a"));
    }
}
