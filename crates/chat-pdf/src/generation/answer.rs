//! Answer generation over a completion provider

use std::sync::Arc;

use crate::error::Result;
use crate::providers::LlmProvider;
use crate::types::{Answer, NO_ANSWER};

/// Runs a prompt through the LLM and wraps the result as an `Answer`
#[derive(Clone)]
pub struct AnswerGenerator {
    llm: Arc<dyn LlmProvider>,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Generate an answer; a blank completion becomes `NO_ANSWER`
    pub async fn generate(&self, prompt: &str, chunks_used: usize) -> Result<Answer> {
        let completion = self.llm.complete(prompt).await?;
        let text = completion.trim();

        if text.is_empty() {
            tracing::warn!("Model returned an empty completion");
            return Ok(Answer::new(NO_ANSWER, chunks_used));
        }

        Ok(Answer::new(text, chunks_used))
    }
}
