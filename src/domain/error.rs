use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Knowledge store error: {0}")]
    KnowledgeStore(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn knowledge_store(message: impl Into<String>) -> Self {
        Self::KnowledgeStore(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Question cannot be empty");
        assert_eq!(
            error.to_string(),
            "Validation error: Question cannot be empty"
        );
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("openai", "rate limited");
        assert_eq!(error.to_string(), "Provider error: openai - rate limited");
    }

    #[test]
    fn test_storage_error() {
        let error = DomainError::storage("feedback log not writable");
        assert_eq!(
            error.to_string(),
            "Storage error: feedback log not writable"
        );
    }
}
