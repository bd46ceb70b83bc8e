//! In-memory adapters for tests and local development.

mod calendar_provider;
mod connection_repository;
mod plan_repository;
mod profile_repository;
mod reward_repository;
mod signal_repository;

pub use calendar_provider::{ProviderCall, StaticCalendarProvider};
pub use connection_repository::InMemoryConnectionRepository;
pub use plan_repository::InMemoryPlanRepository;
pub use profile_repository::InMemoryProfileRepository;
pub use reward_repository::InMemoryRewardRepository;
pub use signal_repository::InMemorySignalRepository;
