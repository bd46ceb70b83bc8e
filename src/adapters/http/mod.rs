//! HTTP adapter - axum REST API.
//!
//! Each endpoint module owns its DTOs, handlers and routes; `router`
//! assembles them under `/api` behind the auth middleware.

pub mod error;
pub mod middleware;
pub mod plans;
pub mod profile;
pub mod request;
pub mod rewards;
pub mod router;
pub mod signals;
pub mod sync;

pub use error::{domain_error_response, ErrorResponse};
pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use plans::PlanHandlers;
pub use profile::ProfileHandlers;
pub use rewards::RewardHandlers;
pub use router::{api_router, ApiHandlers};
pub use signals::SignalHandlers;
pub use sync::SyncHandlers;
