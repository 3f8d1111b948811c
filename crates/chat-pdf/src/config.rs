//! Configuration for the PDF question-answering service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Backend provider for embeddings and generation
    #[serde(default)]
    pub backend: BackendProvider,
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Credential lookup
    #[serde(default)]
    pub credentials: CredentialConfig,
    /// Google Generative Language API settings
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Local Ollama settings
    #[serde(default)]
    pub ollama: OllamaConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Vector index storage
    #[serde(default)]
    pub index: IndexConfig,
}

impl RagConfig {
    /// Load configuration from an optional TOML file, resolve the API
    /// credential from the environment and validate the result.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    Error::config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                Self::from_toml(&raw)?
            }
            None => Self::default(),
        };

        config.credentials.resolve_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load `KEY=value` pairs from a dotenv file into the process environment.
    /// Variables already set are left untouched. Without a path, `.env` is
    /// looked up from the current directory upwards. Returns the file read.
    pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
        let loaded = match path {
            Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
            None => dotenvy::dotenv(),
        };

        match loaded {
            Ok(path) => {
                tracing::info!("Loaded environment from {}", path.display());
                Some(path)
            }
            Err(e) if e.not_found() => None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable env file: {}", e);
                None
            }
        }
    }

    /// Parse configuration from TOML text (no environment lookup)
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::config(format!("Invalid configuration: {}", e)))
    }

    /// Check invariants the pipeline relies on
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::config("chunking.chunk_size must be greater than 0"));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::config(format!(
                "chunking.chunk_overlap ({}) must be smaller than chunking.chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::config("retrieval.top_k must be greater than 0"));
        }
        if self.server.max_upload_size == 0 {
            return Err(Error::config("server.max_upload_size must be greater than 0"));
        }
        Ok(())
    }

    /// The API key, if the selected backend needs one and it is set
    pub fn api_key(&self) -> Option<&str> {
        self.credentials.api_key.as_deref()
    }

    /// Error returned when the backend needs a credential that is missing
    pub fn missing_credential(&self) -> Error {
        Error::MissingCredential {
            env_var: self.credentials.api_key_env.clone(),
        }
    }
}

/// Backend provider selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BackendProvider {
    /// Google Generative Language API (embedding-001 + Gemini)
    #[default]
    Gemini,
    /// Local Ollama server
    Ollama,
}

impl BackendProvider {
    /// Whether this backend needs an API credential
    pub fn requires_credential(&self) -> bool {
        matches!(self, BackendProvider::Gemini)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Maximum upload size in bytes (default: 32MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_size: 32 * 1024 * 1024,
        }
    }
}

/// Where the API credential comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Resolved key, never written back out
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl CredentialConfig {
    /// Read the key from the configured environment variable
    pub fn resolve_from_env(&mut self) {
        self.api_key = std::env::var(&self.api_key_env)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
    }
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
        }
    }
}

/// Google Generative Language API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            embed_model: "models/embedding-001".to_string(),
            generate_model: "gemini-2.0-flash".to_string(),
            temperature: 0.3,
            timeout_secs: 120,
        }
    }
}

/// Ollama configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            generate_model: "phi3".to_string(),
            temperature: 0.3,
            timeout_secs: 120,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10_000,
            chunk_overlap: 200,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of chunks handed to the generator
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

/// Vector index storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Directory under which each request builds its own index
    pub root_dir: PathBuf,
    /// Keep per-request index directories after the request finishes
    pub retain: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./vector_index"),
            retain: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_pipeline() {
        let config = RagConfig::default();
        assert_eq!(config.backend, BackendProvider::Gemini);
        assert_eq!(config.chunking.chunk_size, 10_000);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.gemini.embed_model, "models/embedding-001");
        assert_eq!(config.gemini.generate_model, "gemini-2.0-flash");
        assert!((config.gemini.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.credentials.api_key_env, "GOOGLE_API_KEY");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RagConfig::from_toml(
            r#"
            backend = "ollama"

            [chunking]
            chunk_size = 500

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.backend, BackendProvider::Ollama);
        assert!(!config.backend.requires_credential());
        assert_eq!(config.chunking.chunk_size, 500);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_example_file_parses() {
        let config = RagConfig::from_toml(include_str!("../../../chat-pdf.example.toml")).unwrap();

        assert_eq!(config.backend, BackendProvider::Gemini);
        assert_eq!(config.server.max_upload_size, 32 * 1024 * 1024);
        assert_eq!(config.ollama.generate_model, "phi3");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk_size() {
        let mut config = RagConfig::default();
        config.chunking.chunk_overlap = config.chunking.chunk_size;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let mut config = RagConfig::default();
        config.retrieval.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credential_resolved_from_named_variable() {
        let var = "CHAT_PDF_TEST_KEY_RESOLVE";
        std::env::set_var(var, "  secret  ");

        let mut credentials = CredentialConfig {
            api_key_env: var.to_string(),
            api_key: None,
        };
        credentials.resolve_from_env();
        assert_eq!(credentials.api_key.as_deref(), Some("secret"));

        std::env::set_var(var, "   ");
        credentials.resolve_from_env();
        assert!(credentials.api_key.is_none());

        std::env::remove_var(var);
    }

    #[test]
    fn test_credential_read_from_env_file() {
        let var = "CHAT_PDF_TEST_KEY_DOTENV";
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, format!("{}=from-dotenv\n", var)).unwrap();

        assert_eq!(RagConfig::load_env_file(Some(&env_file)), Some(env_file.clone()));

        let mut config = RagConfig::default();
        config.credentials.api_key_env = var.to_string();
        config.credentials.resolve_from_env();
        assert_eq!(config.api_key(), Some("from-dotenv"));
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(RagConfig::load_env_file(Some(&dir.path().join(".env"))), None);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            RagConfig::from_toml("backend = 42"),
            Err(Error::Config(_))
        ));
    }
}
