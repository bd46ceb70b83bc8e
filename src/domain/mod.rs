//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, time, ratings, errors)
//! - `profile` - Coaching preferences per user
//! - `calendar` - Provider-neutral events, tasks and the encrypted connection
//! - `plan` - Daily plans and the deterministic scheduler
//! - `signals` - Check-ins, drift reports, nudges and the nudge policy
//! - `rewards` - Weekly score, badges, highlights and daily insights
//! - `coaching` - Prompts, model output contracts and fallback texts

pub mod calendar;
pub mod coaching;
pub mod foundation;
pub mod plan;
pub mod profile;
pub mod rewards;
pub mod signals;
