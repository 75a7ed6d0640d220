mod app_config;

pub use app_config::{
    AgentSettings, AppConfig, FeedbackSettings, LogFormat, LoggingConfig, ServerConfig,
};
