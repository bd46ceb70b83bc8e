//! Mock AI Provider for testing.
//!
//! Returns queued responses in order and records every request, so tests can
//! drive the AI path and the fallback path without a network.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response(r#"{"message": "Back to it"}"#)
//!     .with_error(AIError::unavailable("down"));
//!
//! let response = provider.complete(request).await?;
//! assert_eq!(provider.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Responses consumed in order.
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success {
        content: String,
        usage: TokenUsage,
        finish_reason: FinishReason,
    },
    Error(AIError),
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful completion with `content`.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
            usage: TokenUsage::new(10, 20),
            finish_reason: FinishReason::Stop,
        })
    }

    /// Queues an error.
    pub fn with_error(self, error: AIError) -> Self {
        self.push(MockResponse::Error(error))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// An exhausted queue answers with `Unavailable`.
    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Error(AIError::unavailable("no mock response queued")))
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success {
                content,
                usage,
                finish_reason,
            } => Ok(CompletionResponse {
                content,
                usage,
                model: self.info.model.clone(),
                finish_reason,
            }),
            MockResponse::Error(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::{GenerationPurpose, MessageRole, RequestMetadata};

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(
            UserId::new("u-1").unwrap(),
            GenerationPurpose::DailyPlan,
            "trace",
        ))
        .with_message(MessageRole::User, text)
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let provider = MockAIProvider::new()
            .with_response("first")
            .with_error(AIError::rate_limited(5))
            .with_response("third");

        assert_eq!(provider.complete(request("a")).await.unwrap().content, "first");
        assert_eq!(provider.complete(request("b")).await.unwrap_err(), AIError::rate_limited(5));
        assert_eq!(provider.complete(request("c")).await.unwrap().content, "third");
    }

    #[tokio::test]
    async fn empty_queue_is_unavailable() {
        let provider = MockAIProvider::new();
        let err = provider.complete(request("a")).await.unwrap_err();
        assert!(matches!(err, AIError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn records_calls() {
        let provider = MockAIProvider::new().with_response("ok");
        provider.complete(request("plan please")).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.get_calls()[0].messages[0].content, "plan please");
    }

    #[tokio::test]
    async fn clones_share_queue_and_history() {
        let provider = MockAIProvider::new().with_response("shared");
        let clone = provider.clone();

        assert_eq!(clone.complete(request("a")).await.unwrap().content, "shared");
        assert_eq!(provider.call_count(), 1);
    }
}
