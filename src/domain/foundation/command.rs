//! Command infrastructure for coaching handlers.
//!
//! Every command handler accepts a `CommandMetadata` instead of loose
//! `user_id`/`correlation_id` parameters. The metadata also pins the instant
//! the command was issued, so scheduling and nudge cooldowns evaluate against
//! one consistent "now" for the whole request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Timestamp, UserId};

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user executing this command. Every read and write is scoped to it.
    pub user_id: UserId,

    /// Instant the command was issued.
    issued_at: Timestamp,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "api", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates metadata for `user_id` issued now.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            issued_at: Timestamp::now(),
            correlation_id: None,
            source: None,
        }
    }

    /// Builder: pin the issue instant.
    pub fn issued_at(mut self, at: Timestamp) -> Self {
        self.issued_at = at;
        self
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn now(&self) -> Timestamp {
        self.issued_at
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
