//! Math Agent API
//!
//! A self-correcting RAG agent for answering mathematics questions:
//! - Input guardrail rejecting off-topic questions
//! - Similarity-scored retrieval with relevance grading
//! - Fallback web search through a remote tool server
//! - Human-in-the-loop feedback refinement with an audit log

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use api::state::AppState;
use domain::agent::{AgentConfig, AgentNodes, TransitionTable, WorkflowEngine};
use domain::feedback::FeedbackRefiner;
use domain::knowledge::KnowledgeStore;
use domain::llm::LlmProvider;
use infrastructure::feedback::JsonlFeedbackLog;
use infrastructure::knowledge::HttpKnowledgeStore;
use infrastructure::llm::{HttpClient, LlmProviderFactory};
use infrastructure::search::ToolServerSearch;

/// Create the application state with all collaborators initialized.
///
/// Clients are constructed once here and passed down as explicit
/// dependencies; nothing in the agent core reaches for ambient globals.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let timeout = Duration::from_secs(config.agent.request_timeout_secs);

    let llm_provider = create_llm_provider(timeout)?;

    let knowledge_store: Arc<dyn KnowledgeStore> = Arc::new(HttpKnowledgeStore::new(
        HttpClient::with_timeout(timeout)?,
        config.agent.knowledge_store_url.clone(),
    ));
    info!(url = %config.agent.knowledge_store_url, "Knowledge store client ready");

    let fallback_search = Arc::new(ToolServerSearch::new(
        HttpClient::with_timeout(timeout)?,
        config.agent.search_endpoint.clone(),
    ));
    info!(endpoint = %config.agent.search_endpoint, "Fallback search client ready");

    let agent_config = AgentConfig {
        guardrail_model: config.agent.guardrail_model.clone(),
        generation_model: config.agent.generation_model.clone(),
        relevance_threshold: config.agent.relevance_threshold,
        retrieval_top_k: config.agent.retrieval_top_k,
    };

    let nodes = AgentNodes::new(
        llm_provider.clone(),
        knowledge_store.clone(),
        fallback_search,
        agent_config,
    );
    let engine = Arc::new(WorkflowEngine::new(nodes, TransitionTable::standard()?));

    let feedback_log = Arc::new(JsonlFeedbackLog::new(config.feedback.log_path.clone()));
    info!(path = %config.feedback.log_path, "Feedback log ready");

    let refiner = Arc::new(FeedbackRefiner::new(
        llm_provider,
        feedback_log,
        config.agent.generation_model.clone(),
    ));

    Ok(AppState::new(engine, refiner, knowledge_store))
}

fn create_llm_provider(timeout: Duration) -> anyhow::Result<Arc<dyn LlmProvider>> {
    let api_key =
        std::env::var("OPENAI_API_KEY").unwrap_or_else(|_| "sk-placeholder".to_string());
    let base_url = std::env::var("OPENAI_BASE_URL").ok();

    let provider = if let Some(url) = base_url {
        info!("Using OpenAI-compatible provider with custom base URL: {}", url);
        LlmProviderFactory::create_openai_with_base_url(api_key, url, timeout)?
    } else {
        info!("Using OpenAI provider with default base URL");
        LlmProviderFactory::create_openai(api_key, timeout)?
    };

    Ok(provider)
}
