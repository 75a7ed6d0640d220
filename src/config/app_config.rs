use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub agent: AgentSettings,
    #[serde(default)]
    pub feedback: FeedbackSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Agent pipeline settings: models, policy constants and collaborator
/// endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSettings {
    #[serde(default = "default_model")]
    pub guardrail_model: String,
    #[serde(default = "default_model")]
    pub generation_model: String,
    /// Distance threshold; retrieval scoring below it counts as relevant
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f32,
    #[serde(default = "default_retrieval_top_k")]
    pub retrieval_top_k: u32,
    /// Base URL of the vector knowledge store service
    #[serde(default = "default_knowledge_store_url")]
    pub knowledge_store_url: String,
    /// Full URL of the remote search tool endpoint
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,
    /// Deadline applied to every outbound call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackSettings {
    #[serde(default = "default_feedback_log_path")]
    pub log_path: String,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_relevance_threshold() -> f32 {
    0.5
}

fn default_retrieval_top_k() -> u32 {
    1
}

fn default_knowledge_store_url() -> String {
    "http://127.0.0.1:8002".to_string()
}

fn default_search_endpoint() -> String {
    "http://127.0.0.1:8001/invoke/web_search".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_feedback_log_path() -> String {
    "feedback_log.jsonl".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            guardrail_model: default_model(),
            generation_model: default_model(),
            relevance_threshold: default_relevance_threshold(),
            retrieval_top_k: default_retrieval_top_k(),
            knowledge_store_url: default_knowledge_store_url(),
            search_endpoint: default_search_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            log_path: default_feedback_log_path(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
