//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `ProfileRepository`, `PlanRepository`, `SignalRepository`,
//!   `RewardRepository`, `ConnectionRepository`
//!
//! ## External Service Ports
//!
//! - `AIProvider` - Generative model behind the plan and nudge contracts
//! - `CalendarProvider` - OAuth exchange plus events and tasks
//! - `SessionValidator` - Bearer token validation
//! - `SecretCipher` - Encryption of OAuth tokens at rest

mod ai_provider;
mod calendar_provider;
mod connection_repository;
mod plan_repository;
mod profile_repository;
mod reward_repository;
mod secret_cipher;
mod session_validator;
mod signal_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, GenerationPurpose,
    Message, MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use calendar_provider::{CalendarError, CalendarProvider, OAuthTokens};
pub use connection_repository::ConnectionRepository;
pub use plan_repository::PlanRepository;
pub use profile_repository::ProfileRepository;
pub use reward_repository::RewardRepository;
pub use secret_cipher::{CipherError, SecretCipher};
pub use session_validator::SessionValidator;
pub use signal_repository::SignalRepository;
