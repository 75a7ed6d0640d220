//! LLM provider infrastructure

mod http_client;
mod openai;

pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::OpenAiProvider;

#[cfg(test)]
pub use http_client::mock;

use std::sync::Arc;
use std::time::Duration;

use crate::domain::DomainError;
use crate::domain::llm::LlmProvider;

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create an OpenAI-compatible provider with the default base URL
    pub fn create_openai(
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        Ok(Arc::new(OpenAiProvider::new(
            HttpClient::with_timeout(timeout)?,
            api_key,
        )))
    }

    /// Create an OpenAI-compatible provider against a custom base URL
    pub fn create_openai_with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        Ok(Arc::new(OpenAiProvider::with_base_url(
            HttpClient::with_timeout(timeout)?,
            api_key,
            base_url,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_openai_provider() {
        let provider =
            LlmProviderFactory::create_openai("test-key", Duration::from_secs(5)).unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_create_openai_with_base_url() {
        let provider = LlmProviderFactory::create_openai_with_base_url(
            "test-key",
            "http://localhost:8081",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }
}
