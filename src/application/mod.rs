//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers take a `CommandMetadata`; read-only queries take the
//! caller's `UserId`.

pub mod coaching;
pub mod handlers;

#[cfg(test)]
pub(crate) mod test_support;

pub use coaching::{ComposedNudge, NudgeComposer, NudgeRequest, PlanComposer, PlanRequest};
pub use handlers::*;
