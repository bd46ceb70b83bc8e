//! AI Provider Adapters.
//!
//! Implementations of the `AIProvider` port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Queued responses and call tracking for tests
//! - `OpenAIProvider` - OpenAI-compatible chat-completions API

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
