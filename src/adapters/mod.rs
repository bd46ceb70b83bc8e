//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - OpenAI-compatible chat completions and a queued mock
//! - `auth` - JWT and mock session validators
//! - `crypto` - Token encryption at rest
//! - `google` - Google OAuth, Calendar and Tasks
//! - `http` - axum REST API
//! - `memory` - In-memory repositories and calendar provider
//! - `postgres` - sqlx repositories

pub mod ai;
pub mod auth;
pub mod crypto;
pub mod google;
pub mod http;
pub mod memory;
pub mod postgres;
