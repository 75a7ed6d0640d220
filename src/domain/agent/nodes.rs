//! Node implementations for the agent graph

use std::sync::Arc;

use tracing::{info, warn};

use super::AgentConfig;
use super::prompts;
use super::state::{RouteDecision, StateUpdate, WorkflowState};
use crate::domain::DomainError;
use crate::domain::knowledge::KnowledgeStore;
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::search::FallbackSearch;

/// Collaborators and policy constants shared by all nodes.
///
/// Clients are injected once at construction so nodes stay testable with
/// substitutable fakes.
#[derive(Debug)]
pub struct AgentNodes {
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn KnowledgeStore>,
    search: Arc<dyn FallbackSearch>,
    config: AgentConfig,
}

impl AgentNodes {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn KnowledgeStore>,
        search: Arc<dyn FallbackSearch>,
        config: AgentConfig,
    ) -> Self {
        Self {
            llm,
            store,
            search,
            config,
        }
    }

    /// Classify the question as in-domain or not with a single yes/no LLM
    /// call. Only a response containing "yes" passes; anything ambiguous or
    /// malformed rejects, with no retry.
    pub async fn input_guardrail(
        &self,
        state: &WorkflowState,
    ) -> Result<StateUpdate, DomainError> {
        info!("node: input guardrail");

        let request = LlmRequest::builder()
            .user(prompts::guardrail_prompt(state.question()))
            .temperature(0.0)
            .build();
        let response = self.llm.chat(&self.config.guardrail_model, request).await?;

        if response.content().to_lowercase().contains("yes") {
            info!("guardrail: question accepted");
            Ok(StateUpdate::route(RouteDecision::Continue))
        } else {
            info!("guardrail: question rejected");
            Ok(StateUpdate::generation(prompts::REFUSAL_MESSAGE)
                .with_route(RouteDecision::End))
        }
    }

    /// Query the knowledge store for the best matches with scores. Score
    /// interpretation belongs to the grader, not here.
    pub async fn retrieve(&self, state: &WorkflowState) -> Result<StateUpdate, DomainError> {
        info!(top_k = self.config.retrieval_top_k, "node: retrieve");

        let documents = self
            .store
            .similarity_search(state.question(), self.config.retrieval_top_k)
            .await?;

        Ok(StateUpdate::documents(documents))
    }

    /// Threshold the best match's distance to decide whether retrieved
    /// context is usable or fallback search is required.
    pub fn grade_documents(&self, state: &WorkflowState) -> Result<StateUpdate, DomainError> {
        info!("node: grade documents");

        let Some(best) = state.documents.first() else {
            info!("grading: nothing retrieved, routing to web search");
            return Ok(StateUpdate::route(RouteDecision::WebSearch));
        };

        // Distance metric: lower means more similar.
        if best.score < self.config.relevance_threshold {
            info!(score = best.score, "grading: documents relevant");
            let context = state
                .documents
                .iter()
                .map(|doc| doc.content.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            Ok(StateUpdate::context(context).with_route(RouteDecision::Generate))
        } else {
            info!(score = best.score, "grading: documents not relevant, routing to web search");
            Ok(StateUpdate::route(RouteDecision::WebSearch))
        }
    }

    /// Call the remote search tool and assemble its results into context.
    /// Never fails the pipeline: on any client error the context degrades to
    /// a fixed message and the workflow continues to generation.
    pub async fn web_search(&self, state: &WorkflowState) -> Result<StateUpdate, DomainError> {
        info!("node: web search");

        match self.search.search(state.question()).await {
            Ok(hits) => {
                let context = hits
                    .iter()
                    .map(|hit| format!("URL: {}\nContent: {}", hit.url, hit.content))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(StateUpdate::context(context))
            }
            Err(error) => {
                warn!(%error, "web search unavailable, degrading context");
                Ok(StateUpdate::context(prompts::SEARCH_DEGRADED_MESSAGE))
            }
        }
    }

    /// One deterministic completion call with the fixed answer template.
    /// A provider error is fatal to the request.
    pub async fn generate(&self, state: &WorkflowState) -> Result<StateUpdate, DomainError> {
        info!("node: generate");

        let context = state
            .context
            .as_deref()
            .ok_or_else(|| DomainError::internal("generation reached without context"))?;

        let request = LlmRequest::builder()
            .user(prompts::answer_prompt(state.question(), context))
            .temperature(0.0)
            .build();
        let response = self.llm.chat(&self.config.generation_model, request).await?;

        Ok(StateUpdate::generation(response.content()))
    }

    /// Policy checkpoint on the generated answer. Pass-through in the
    /// baseline; implementers may rewrite the text but must always hand back
    /// exactly one string.
    pub fn output_guardrail(&self, state: &WorkflowState) -> Result<StateUpdate, DomainError> {
        info!("node: output guardrail");

        let generation = state
            .generation
            .as_deref()
            .ok_or_else(|| DomainError::internal("output guardrail reached without generation"))?;

        Ok(StateUpdate::generation(generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::knowledge::ScoredDocument;
    use crate::domain::knowledge::mock::MockKnowledgeStore;
    use crate::domain::llm::mock::MockLlmProvider;
    use crate::domain::search::SearchHit;
    use crate::domain::search::mock::MockFallbackSearch;

    fn nodes_with(
        llm: MockLlmProvider,
        store: MockKnowledgeStore,
        search: MockFallbackSearch,
    ) -> AgentNodes {
        AgentNodes::new(
            Arc::new(llm),
            Arc::new(store),
            Arc::new(search),
            AgentConfig::default(),
        )
    }

    fn default_nodes() -> AgentNodes {
        nodes_with(
            MockLlmProvider::new(),
            MockKnowledgeStore::new(),
            MockFallbackSearch::new(),
        )
    }

    #[tokio::test]
    async fn test_guardrail_passes_on_yes() {
        let nodes = nodes_with(
            MockLlmProvider::new().with_response("Yes, it is."),
            MockKnowledgeStore::new(),
            MockFallbackSearch::new(),
        );
        let state = WorkflowState::new("What is a derivative?");

        let update = nodes.input_guardrail(&state).await.unwrap();

        assert_eq!(update.route_decision, Some(RouteDecision::Continue));
        assert!(update.generation.is_none());
    }

    #[tokio::test]
    async fn test_guardrail_rejects_on_no() {
        let nodes = nodes_with(
            MockLlmProvider::new().with_response("No."),
            MockKnowledgeStore::new(),
            MockFallbackSearch::new(),
        );
        let state = WorkflowState::new("What's a good pizza topping?");

        let update = nodes.input_guardrail(&state).await.unwrap();

        assert_eq!(update.route_decision, Some(RouteDecision::End));
        assert_eq!(update.generation.as_deref(), Some(prompts::REFUSAL_MESSAGE));
    }

    #[tokio::test]
    async fn test_guardrail_rejects_ambiguous_output() {
        let nodes = nodes_with(
            MockLlmProvider::new().with_response("I am not sure about that."),
            MockKnowledgeStore::new(),
            MockFallbackSearch::new(),
        );
        let state = WorkflowState::new("hmm");

        let update = nodes.input_guardrail(&state).await.unwrap();

        assert_eq!(update.route_decision, Some(RouteDecision::End));
    }

    #[tokio::test]
    async fn test_guardrail_is_case_insensitive() {
        let nodes = nodes_with(
            MockLlmProvider::new().with_response("YES"),
            MockKnowledgeStore::new(),
            MockFallbackSearch::new(),
        );
        let state = WorkflowState::new("Solve x+1=2");

        let update = nodes.input_guardrail(&state).await.unwrap();
        assert_eq!(update.route_decision, Some(RouteDecision::Continue));
    }

    #[tokio::test]
    async fn test_retrieve_passes_documents_through_unfiltered() {
        let nodes = nodes_with(
            MockLlmProvider::new(),
            MockKnowledgeStore::new()
                .with_results(vec![ScoredDocument::new("doc", 0.9)]),
            MockFallbackSearch::new(),
        );
        let state = WorkflowState::new("q");

        let update = nodes.retrieve(&state).await.unwrap();

        // A bad score is still returned; grading decides what to do with it.
        let documents = update.documents.unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].score, 0.9);
    }

    #[test]
    fn test_grade_relevant_below_threshold() {
        let nodes = default_nodes();
        let mut state = WorkflowState::new("q");
        state.documents = vec![
            ScoredDocument::new("first doc", 0.2),
            ScoredDocument::new("second doc", 0.3),
        ];

        let update = nodes.grade_documents(&state).unwrap();

        assert_eq!(update.route_decision, Some(RouteDecision::Generate));
        assert_eq!(update.context.as_deref(), Some("first doc\nsecond doc"));
    }

    #[test]
    fn test_grade_irrelevant_at_threshold() {
        let nodes = default_nodes();
        let mut state = WorkflowState::new("q");
        state.documents = vec![ScoredDocument::new("doc", 0.5)];

        let update = nodes.grade_documents(&state).unwrap();

        assert_eq!(update.route_decision, Some(RouteDecision::WebSearch));
        assert!(update.context.is_none());
    }

    #[test]
    fn test_grade_empty_routes_to_web_search() {
        let nodes = default_nodes();
        let state = WorkflowState::new("q");

        let update = nodes.grade_documents(&state).unwrap();

        assert_eq!(update.route_decision, Some(RouteDecision::WebSearch));
    }

    #[tokio::test]
    async fn test_web_search_renders_hits_in_order() {
        let nodes = nodes_with(
            MockLlmProvider::new(),
            MockKnowledgeStore::new(),
            MockFallbackSearch::new().with_hits(vec![
                SearchHit::new("https://a.example", "alpha"),
                SearchHit::new("https://b.example", "beta"),
            ]),
        );
        let state = WorkflowState::new("q");

        let update = nodes.web_search(&state).await.unwrap();

        assert_eq!(
            update.context.as_deref(),
            Some(
                "URL: https://a.example\nContent: alpha\nURL: https://b.example\nContent: beta"
            )
        );
    }

    #[tokio::test]
    async fn test_web_search_failure_degrades_context() {
        let nodes = nodes_with(
            MockLlmProvider::new(),
            MockKnowledgeStore::new(),
            MockFallbackSearch::new().with_error("connection refused"),
        );
        let state = WorkflowState::new("q");

        let update = nodes.web_search(&state).await.unwrap();

        assert_eq!(
            update.context.as_deref(),
            Some(prompts::SEARCH_DEGRADED_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_generate_embeds_question_and_context() {
        let llm = Arc::new(MockLlmProvider::new().with_response("The answer is 2x."));
        let nodes = AgentNodes::new(
            llm.clone(),
            Arc::new(MockKnowledgeStore::new()),
            Arc::new(MockFallbackSearch::new()),
            AgentConfig::default(),
        );
        let mut state = WorkflowState::new("What is the derivative of x^2?");
        state.context = Some("power rule notes".to_string());

        let update = nodes.generate(&state).await.unwrap();
        assert_eq!(update.generation.as_deref(), Some("The answer is 2x."));

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        let prompt = calls[0].1.user_text();
        assert!(prompt.contains("What is the derivative of x^2?"));
        assert!(prompt.contains("power rule notes"));
        assert_eq!(calls[0].1.temperature, Some(0.0));
    }

    #[tokio::test]
    async fn test_generate_provider_error_is_fatal() {
        let nodes = nodes_with(
            MockLlmProvider::new().with_error("model overloaded"),
            MockKnowledgeStore::new(),
            MockFallbackSearch::new(),
        );
        let mut state = WorkflowState::new("q");
        state.context = Some("ctx".to_string());

        assert!(nodes.generate(&state).await.is_err());
    }

    #[tokio::test]
    async fn test_generate_without_context_is_internal_error() {
        let nodes = default_nodes();
        let state = WorkflowState::new("q");

        assert!(nodes.generate(&state).await.is_err());
    }

    #[test]
    fn test_output_guardrail_is_identity() {
        let nodes = default_nodes();
        let mut state = WorkflowState::new("q");
        state.generation = Some("the answer".to_string());

        let update = nodes.output_guardrail(&state).unwrap();
        assert_eq!(update.generation.as_deref(), Some("the answer"));
    }

    #[test]
    fn test_output_guardrail_requires_generation() {
        let nodes = default_nodes();
        let state = WorkflowState::new("q");

        assert!(nodes.output_guardrail(&state).is_err());
    }
}
