//! Gemini embedding adapter
//!
//! Bridges the raw `embedContent` endpoint to the `EmbeddingModel`
//! interface the index expects. Queries and document chunks are embedded
//! with the provider's distinct task types. No batching, caching, or
//! rate limiting.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use simplerag_core::{EmbeddingModel, GeminiConfig, RagError, Result};

/// Embedding task type, as understood by the provider
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum TaskType {
    RetrievalQuery,
    RetrievalDocument,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest {
    model: String,
    content: Content,
    task_type: TaskType,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

/// Gemini embedding API client
pub struct GeminiEmbedding {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    dimension: usize,
}

impl GeminiEmbedding {
    /// Create a new Gemini embedding client
    ///
    /// `api_key` may be `None`; every call will then fail with a
    /// `Gemini` error instead of the constructor failing.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        let dimension = match model.as_str() {
            "models/gemini-embedding-001" => 3072,
            "models/text-embedding-004" => 768,
            "models/embedding-001" => 768,
            _ => 768, // Default
        };

        Self {
            client: Client::new(),
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model,
            dimension,
        }
    }

    /// Create from config
    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(config.api_key.clone(), config.embedding_model.clone())
            .with_base_url(config.base_url.clone())
    }

    /// Set custom base URL (for tests or proxies)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn embed_with_task(&self, text: &str, task_type: TaskType) -> Result<Vec<f32>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| RagError::Gemini("GOOGLE_API_KEY not set".to_string()))?;

        tracing::debug!(model = %self.model, ?task_type, "Embedding text");

        let request = EmbedContentRequest {
            model: self.model.clone(),
            content: Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
            task_type,
        };

        let response = self
            .client
            .post(format!(
                "{}/{}:embedContent?key={}",
                self.base_url, self.model, api_key
            ))
            .json(&request)
            .send()
            .await
            .map_err(|e| RagError::Gemini(format!("Embedding request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RagError::Gemini(format!(
                "Embedding error {status}: {error_text}"
            )));
        }

        let result: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| RagError::Gemini(format!("Failed to parse embedding response: {e}")))?;

        Ok(result.embedding.values)
    }
}

#[async_trait]
impl EmbeddingModel for GeminiEmbedding {
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        self.embed_with_task(query, TaskType::RetrievalQuery).await
    }

    async fn embed_document(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_with_task(text, TaskType::RetrievalDocument)
            .await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
