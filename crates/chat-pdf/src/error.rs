//! Error types for the PDF question-answering pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline and request errors
#[derive(Debug, Error)]
pub enum Error {
    /// No API credential configured for a backend that needs one
    #[error("API key not found in environment variable {env_var}")]
    MissingCredential { env_var: String },

    /// The form carried no PDF file
    #[error("No PDF file was uploaded")]
    MissingUpload,

    /// The form carried an empty question
    #[error("No question was provided")]
    MissingQuestion,

    /// The multipart body could not be read
    #[error("Invalid form submission: {0}")]
    InvalidForm(String),

    /// The upload is not a readable PDF, or holds no text
    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    /// Embedding service failure
    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    /// LLM generation failure
    #[error("Generation service error: {0}")]
    GenerationService(String),

    /// Vector index validation or persistence error
    #[error("Vector index error: {0}")]
    Index(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an unreadable document error
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self::UnreadableDocument(message.into())
    }

    /// Create an embedding service error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::EmbeddingService(message.into())
    }

    /// Create a generation service error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationService(message.into())
    }

    /// Create a vector index error
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Message shown to the user in the rendered page
    pub fn user_message(&self) -> String {
        match self {
            Error::MissingCredential { env_var } => format!(
                "API key not found. Please set the {} environment variable.",
                env_var
            ),
            Error::MissingUpload => "Please upload a PDF file.".to_string(),
            Error::MissingQuestion => "Please enter a question.".to_string(),
            other => format!("Error: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_have_fixed_messages() {
        let err = Error::MissingCredential {
            env_var: "GOOGLE_API_KEY".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "API key not found. Please set the GOOGLE_API_KEY environment variable."
        );
        assert_eq!(Error::MissingUpload.user_message(), "Please upload a PDF file.");
        assert_eq!(Error::MissingQuestion.user_message(), "Please enter a question.");
    }

    #[test]
    fn test_stage_errors_are_prefixed() {
        let msg = Error::generation("quota exceeded").user_message();
        assert!(msg.starts_with("Error: "));
        assert!(msg.contains("quota exceeded"));
    }
}
