//! Prompt templates and fixed agent responses

/// Canned refusal returned when the input guardrail rejects a question
pub const REFUSAL_MESSAGE: &str =
    "I can only help with mathematics questions. Please ask me something about math.";

/// Context substituted when the fallback search tool cannot be reached
pub const SEARCH_DEGRADED_MESSAGE: &str =
    "web search failed because the tool server could not be reached";

/// Yes/no domain classification prompt for the input guardrail
pub fn guardrail_prompt(question: &str) -> String {
    format!(
        "You are a strict classifier. Decide whether the following question \
         is about mathematics (arithmetic, algebra, geometry, calculus, \
         probability, or any other mathematical topic).\n\n\
         QUESTION:\n{question}\n\n\
         Answer with a single word: yes or no."
    )
}

/// Answer synthesis prompt embedding the question and assembled context
pub fn answer_prompt(question: &str, context: &str) -> String {
    format!(
        "You are a helpful math professor. Your goal is to provide a clear, \
         step-by-step solution to the user's question based on the context \
         provided.\n\n\
         CONTEXT:\n{context}\n\n\
         QUESTION:\n{question}\n\n\
         ANSWER:"
    )
}

/// Re-derivation prompt used when a reviewer marks an answer incorrect
pub fn rederive_prompt(question: &str) -> String {
    format!(
        "A previous answer to the following math question was judged \
         incorrect. Solve the problem again from first principles, showing \
         every step. Do not reference or justify the earlier answer.\n\n\
         QUESTION:\n{question}\n\n\
         ANSWER:"
    )
}

/// Simplification prompt used when a reviewer asks for clarification
pub fn simplify_prompt(question: &str, answer: &str) -> String {
    format!(
        "Rewrite the following explanation in simpler terms, as if teaching \
         a beginner, and include one fully worked example.\n\n\
         QUESTION:\n{question}\n\n\
         EXPLANATION:\n{answer}\n\n\
         SIMPLER EXPLANATION:"
    )
}
