//! Answer types

/// Phrase the model is instructed to emit when the context lacks the answer
pub const SENTINEL_ANSWER: &str = "answer is not available in the context";

/// Answer used when the model returns no text at all
pub const NO_ANSWER: &str = "No answer returned.";

/// Generated answer for one question
#[derive(Debug, Clone)]
pub struct Answer {
    /// Answer text as returned by the model
    pub text: String,
    /// Number of retrieved chunks placed in the prompt
    pub chunks_used: usize,
    /// Wall-clock time spent in the pipeline
    pub processing_time_ms: u64,
}

impl Answer {
    /// Create an answer
    pub fn new(text: impl Into<String>, chunks_used: usize) -> Self {
        Self {
            text: text.into(),
            chunks_used,
            processing_time_ms: 0,
        }
    }

    /// Whether the model reported the context as insufficient
    pub fn is_unavailable(&self) -> bool {
        let normalized = self
            .text
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '.')
            .to_lowercase();
        normalized == SENTINEL_ANSWER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_detection_tolerates_punctuation() {
        assert!(Answer::new(SENTINEL_ANSWER, 2).is_unavailable());
        assert!(Answer::new("\"Answer is not available in the context.\"\n", 2).is_unavailable());
        assert!(!Answer::new("The capital of France is Paris.", 2).is_unavailable());
    }
}
