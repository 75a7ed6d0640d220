use std::fmt::Debug;

use async_trait::async_trait;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Trait for LLM providers (OpenAI-compatible endpoints, etc.)
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::domain::llm::Message;

    /// Mock LLM provider returning queued responses in order and recording
    /// every request it receives
    #[derive(Debug)]
    pub struct MockLlmProvider {
        responses: Mutex<VecDeque<Result<String, String>>>,
        calls: Mutex<Vec<(String, LlmRequest)>>,
    }

    impl MockLlmProvider {
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Queue a successful completion text
        pub fn with_response(self, text: impl Into<String>) -> Self {
            self.responses.lock().unwrap().push_back(Ok(text.into()));
            self
        }

        /// Queue a provider error
        pub fn with_error(self, error: impl Into<String>) -> Self {
            self.responses.lock().unwrap().push_back(Err(error.into()));
            self
        }

        /// Number of chat calls made
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// Requests received so far, as (model, request) pairs
        pub fn calls(&self) -> Vec<(String, LlmRequest)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Default for MockLlmProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn chat(
            &self,
            model: &str,
            request: LlmRequest,
        ) -> Result<LlmResponse, DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((model.to_string(), request));

            match self.responses.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(LlmResponse::new(
                    "mock-id".to_string(),
                    model.to_string(),
                    Message::assistant(text),
                )),
                Some(Err(error)) => Err(DomainError::provider("mock", error)),
                None => Err(DomainError::provider("mock", "No mock response configured")),
            }
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}
