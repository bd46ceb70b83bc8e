//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the coaching domain.

mod auth;
mod command;
mod errors;
mod ids;
mod rating;
mod time_span;
mod timestamp;
mod utc_offset;

pub use auth::{AuthError, AuthenticatedUser};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BlockId, CheckInId, DriftReportId, NudgeId, PlanId, UserId};
pub use rating::Rating;
pub use time_span::TimeSpan;
pub use timestamp::Timestamp;
pub use utc_offset::UtcOffset;
