//! Prompt template for document-grounded answers

use crate::types::{ScoredChunk, SENTINEL_ANSWER};

/// Separator placed between retrieved chunks in the context block
const CHUNK_SEPARATOR: &str = "\n\n";

/// Prompt builder for PDF questions
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved chunk texts in retrieval order
    pub fn build_context(results: &[ScoredChunk]) -> String {
        results
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR)
    }

    /// Build the question-answering prompt from retrieved chunks
    pub fn build(results: &[ScoredChunk], question: &str) -> String {
        Self::build_qa_prompt(&Self::build_context(results), question)
    }

    /// Fill the answer template with a context block and a question
    pub fn build_qa_prompt(context: &str, question: &str) -> String {
        format!(
            r#"Answer the question as detailed as possible from the provided context,
make sure to provide all the details, if the answer is not in
provided context just say, "{sentinel}",
don't provide the wrong answer

Context:
 {context}?

Question: 
{question}

Answer:
"#,
            sentinel = SENTINEL_ANSWER,
            context = context,
            question = question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chunk;

    fn scored(text: &str, similarity: f32) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk::new(text.to_string(), 0, text.chars().count(), 0),
            similarity,
        }
    }

    #[test]
    fn test_exact_template() {
        let prompt = PromptBuilder::build_qa_prompt("CTX", "Q?");
        assert_eq!(
            prompt,
            "Answer the question as detailed as possible from the provided context,\n\
             make sure to provide all the details, if the answer is not in\n\
             provided context just say, \"answer is not available in the context\",\n\
             don't provide the wrong answer\n\
             \n\
             Context:\n \
             CTX?\n\
             \n\
             Question: \n\
             Q?\n\
             \n\
             Answer:\n"
        );
    }

    #[test]
    fn test_context_keeps_retrieval_order() {
        let results = vec![scored("closest chunk", 0.9), scored("second chunk", 0.5)];
        let prompt = PromptBuilder::build(&results, "Which chunk?");

        assert!(prompt.contains(" closest chunk\n\nsecond chunk?\n"));
        assert!(prompt.contains("Question: \nWhich chunk?\n"));
    }

    #[test]
    fn test_empty_context() {
        assert_eq!(PromptBuilder::build_context(&[]), "");
        assert!(PromptBuilder::build(&[], "q").contains("Context:\n ?\n"));
    }
}
