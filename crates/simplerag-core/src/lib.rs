//! SimpleRAG Core - Shared error types, model traits, and configuration
//!
//! This crate defines the seams the rest of the workspace plugs into:
//! - `RagError`, the common error enum
//! - `EmbeddingModel` and `ChatModel`, the provider-facing traits
//! - Configuration management

pub mod config;

pub use config::{AppConfig, ConfigError, GeminiConfig, IndexConfig, ServerConfig, StorageConfig};

use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Common error type for SimpleRAG operations
#[derive(Error, Debug)]
pub enum RagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document parsing error: {0}")]
    Parse(String),

    #[error("Gemini API error: {0}")]
    Gemini(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("No index found")]
    IndexNotFound,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RagError>;

// ============================================================================
// Model Traits
// ============================================================================

/// Trait for text embedding providers
///
/// Queries and documents are embedded separately because hosted providers
/// distinguish the two task types.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Embed a search query
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>>;

    /// Embed a document chunk
    async fn embed_document(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed multiple document chunks
    ///
    /// Default implementation embeds sequentially; providers without a
    /// batch endpoint need nothing more.
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed_document(text).await?);
        }
        Ok(results)
    }

    /// Embedding vector dimension
    fn dimension(&self) -> usize;
}

/// Trait for chat completion providers
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a completion for a prompt
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEmbedding;

    #[async_trait]
    impl EmbeddingModel for FixedEmbedding {
        async fn embed_query(&self, _query: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        async fn embed_document(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.len() as f32, 1.0])
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    #[tokio::test]
    async fn test_embed_documents_default_impl() {
        let model = FixedEmbedding;
        let texts = vec!["a".to_string(), "abc".to_string()];

        let embeddings = model.embed_documents(&texts).await.unwrap();

        assert_eq!(embeddings.len(), 2);
        assert_eq!(embeddings[0], vec![1.0, 1.0]);
        assert_eq!(embeddings[1], vec![3.0, 1.0]);
    }

    #[test]
    fn test_error_display() {
        let err = RagError::Gemini("GOOGLE_API_KEY not set".to_string());
        assert_eq!(err.to_string(), "Gemini API error: GOOGLE_API_KEY not set");
    }
}
