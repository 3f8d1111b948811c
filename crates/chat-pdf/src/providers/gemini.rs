//! Google Generative Language API providers
//!
//! `embedding-001` for chunk and question embeddings, Gemini for answer
//! generation. Requests authenticate with an API key header.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::LlmProvider;

/// Maximum requests per `batchEmbedContents` call
const MAX_EMBED_BATCH: usize = 100;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Normalise a model name to the `models/<name>` resource form
fn model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

/// Shared HTTP plumbing for both Gemini providers
#[derive(Clone)]
struct GeminiHttp {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiHttp {
    fn new(config: &GeminiConfig, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/{}:{}", self.base_url, model_path(model), method)
    }

    async fn model_exists(&self, model: &str) -> bool {
        let url = format!("{}/{}", self.base_url, model_path(model));
        match self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum TaskType {
    RetrievalDocument,
    RetrievalQuery,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest {
    model: String,
    content: Content,
    task_type: TaskType,
}

#[derive(Serialize)]
struct BatchEmbedRequest {
    requests: Vec<EmbedContentRequest>,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Deserialize)]
struct BatchEmbedResponse {
    #[serde(default)]
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

/// Embedding provider backed by `embedContent` / `batchEmbedContents`
pub struct GeminiEmbedder {
    http: GeminiHttp,
    model: String,
}

impl GeminiEmbedder {
    /// Create a new embedder
    pub fn new(config: &GeminiConfig, api_key: &str) -> Result<Self> {
        Ok(Self {
            http: GeminiHttp::new(config, api_key)?,
            model: model_path(&config.embed_model),
        })
    }

    fn request(&self, text: &str, task_type: TaskType) -> EmbedContentRequest {
        EmbedContentRequest {
            model: self.model.clone(),
            content: Content::text(None, text),
            task_type,
        }
    }

    async fn embed_one(&self, text: &str, task_type: TaskType) -> Result<Vec<f32>> {
        let response = self
            .http
            .client
            .post(self.http.endpoint(&self.model, "embedContent"))
            .header(API_KEY_HEADER, &self.http.api_key)
            .json(&self.request(text, task_type))
            .send()
            .await
            .map_err(|e| Error::embedding(format!("Gemini embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::embedding(format!(
                "Gemini embedding failed ({}): {}",
                status, body
            )));
        }

        let embed_response: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("Failed to parse embedding response: {}", e)))?;

        Ok(embed_response.embedding.values)
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbedder {
    async fn embed_document(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_one(text, TaskType::RetrievalDocument).await
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_one(text, TaskType::RetrievalQuery).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(MAX_EMBED_BATCH) {
            let request = BatchEmbedRequest {
                requests: batch
                    .iter()
                    .map(|t| self.request(t, TaskType::RetrievalDocument))
                    .collect(),
            };

            let response = self
                .http
                .client
                .post(self.http.endpoint(&self.model, "batchEmbedContents"))
                .header(API_KEY_HEADER, &self.http.api_key)
                .json(&request)
                .send()
                .await
                .map_err(|e| {
                    Error::embedding(format!("Gemini batch embedding request failed: {}", e))
                })?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::embedding(format!(
                    "Gemini batch embedding failed ({}): {}",
                    status, body
                )));
            }

            let batch_response: BatchEmbedResponse = response.json().await.map_err(|e| {
                Error::embedding(format!("Failed to parse batch embedding response: {}", e))
            })?;

            if batch_response.embeddings.len() != batch.len() {
                return Err(Error::embedding(format!(
                    "Gemini returned {} embeddings for {} texts",
                    batch_response.embeddings.len(),
                    batch.len()
                )));
            }

            all_embeddings.extend(batch_response.embeddings.into_iter().map(|e| e.values));
        }

        Ok(all_embeddings)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.http.model_exists(&self.model).await)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate; empty if there is none
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Gemini chat model via `generateContent`
pub struct GeminiLlm {
    http: GeminiHttp,
    model: String,
    temperature: f32,
}

impl GeminiLlm {
    /// Create a new Gemini client
    pub fn new(config: &GeminiConfig, api_key: &str) -> Result<Self> {
        Ok(Self {
            http: GeminiHttp::new(config, api_key)?,
            model: config.generate_model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl LlmProvider for GeminiLlm {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        tracing::debug!("Generating answer with model: {}", self.model);

        let response = self
            .http
            .client
            .post(self.http.endpoint(&self.model, "generateContent"))
            .header(API_KEY_HEADER, &self.http.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::generation(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::generation(format!(
                "Gemini generation failed ({}): {}",
                status, body
            )));
        }

        let gen_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::generation(format!("Failed to parse Gemini response: {}", e)))?;

        Ok(gen_response.into_text())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.http.model_exists(&self.model).await)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
