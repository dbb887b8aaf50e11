//! Vector index over embedded document chunks
//!
//! The index is a flat list of embedded nodes built from a single source
//! file, persisted as JSON under a local directory, and searched by
//! brute-force cosine similarity. Every build replaces the previous
//! index entirely; there is no incremental insert.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use simplerag_core::{EmbeddingModel, RagError, Result};
use uuid::Uuid;

use crate::loader;
use crate::splitter::TextSplitter;

const INDEX_FILE: &str = "index.json";

/// An embedded document chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    pub text: String,
    pub embedding: Vec<f32>,
    pub source_file: String,
    pub chunk_index: u32,
}

/// Index-level metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// File the index was built from
    pub source_file: String,

    /// Build timestamp
    pub created_at: DateTime<Utc>,

    /// Embedding dimension
    pub dimension: usize,
}

/// A search hit with its similarity score
#[derive(Debug, Clone)]
pub struct ScoredNode {
    pub node: Node,
    pub score: f32,
}

/// Vector index over the chunks of one document
#[derive(Debug, Serialize, Deserialize)]
pub struct VectorIndex {
    pub metadata: IndexMetadata,
    nodes: Vec<Node>,
}

impl VectorIndex {
    /// Build an index from a single file
    ///
    /// Loads the file, splits it into chunks, and embeds every chunk as a
    /// document embedding.
    pub async fn build(
        path: &Path,
        splitter: &TextSplitter,
        embedder: &dyn EmbeddingModel,
    ) -> Result<Self> {
        let text = loader::load_document(path)?;
        let chunks = splitter.split(&text);

        if chunks.is_empty() {
            return Err(RagError::Index(format!(
                "Document produced no chunks: {}",
                path.display()
            )));
        }

        let source_file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::info!(
            source = %source_file,
            chunks = chunks.len(),
            "Building vector index"
        );

        let embeddings = embedder.embed_documents(&chunks).await?;

        let nodes = chunks
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (text, embedding))| Node {
                id: Uuid::new_v4(),
                text,
                embedding,
                source_file: source_file.clone(),
                chunk_index: i as u32,
            })
            .collect();

        Ok(Self {
            metadata: IndexMetadata {
                source_file,
                created_at: Utc::now(),
                dimension: embedder.dimension(),
            },
            nodes,
        })
    }

    /// Persist the index to a directory
    pub fn persist(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let json = serde_json::to_string(self)
            .map_err(|e| RagError::Index(format!("Failed to serialize index: {e}")))?;
        std::fs::write(dir.join(INDEX_FILE), json)?;

        tracing::info!(dir = %dir.display(), "Index persisted");
        Ok(())
    }

    /// Load a previously persisted index
    ///
    /// A missing index file is `RagError::IndexNotFound`; a corrupt one
    /// is an `Index` error.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(INDEX_FILE);
        if !path.exists() {
            return Err(RagError::IndexNotFound);
        }

        let json = std::fs::read_to_string(&path)?;
        serde_json::from_str(&json)
            .map_err(|e| RagError::Index(format!("Failed to deserialize index: {e}")))
    }

    /// Search for the chunks most similar to a query embedding
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Vec<ScoredNode> {
        let mut scored: Vec<ScoredNode> = self
            .nodes
            .iter()
            .map(|node| ScoredNode {
                score: cosine_similarity(query_embedding, &node.embedding),
                node: node.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        scored
    }

    /// Number of nodes in the index
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the index holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Cosine similarity between two vectors; 0.0 for mismatched or zero vectors
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    /// Maps each chunk to a one-hot-ish vector based on which keyword it
    /// contains, so similarity ranking is deterministic.
    struct KeywordEmbedding;

    fn keyword_vector(text: &str) -> Vec<f32> {
        vec![
            if text.contains("apple") { 1.0 } else { 0.0 },
            if text.contains("banana") { 1.0 } else { 0.0 },
            if text.contains("cherry") { 1.0 } else { 0.0 },
            0.1,
        ]
    }

    #[async_trait]
    impl EmbeddingModel for KeywordEmbedding {
        async fn embed_query(&self, query: &str) -> simplerag_core::Result<Vec<f32>> {
            Ok(keyword_vector(query))
        }

        async fn embed_document(&self, text: &str) -> simplerag_core::Result<Vec<f32>> {
            Ok(keyword_vector(text))
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    fn write_doc(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    async fn build_fruit_index(file: &NamedTempFile) -> VectorIndex {
        let splitter = TextSplitter::new(40, 0);
        VectorIndex::build(file.path(), &splitter, &KeywordEmbedding)
            .await
            .unwrap()
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_build_and_search() {
        let file = write_doc(
            "apple pie recipes need tart apples \n\n\
             banana bread needs ripe bananas today \n\n\
             cherry jam simmers fresh cherries slowly",
        );
        let index = build_fruit_index(&file).await;

        assert!(!index.is_empty());
        assert_eq!(index.metadata.dimension, 4);

        let query = keyword_vector("banana");
        let hits = index.search(&query, 1);

        assert_eq!(hits.len(), 1);
        assert!(hits[0].node.text.contains("banana"));
    }

    #[tokio::test]
    async fn test_search_orders_by_score() {
        let file = write_doc(
            "apple pie recipes need tart apples \n\n\
             banana bread needs ripe bananas today \n\n\
             cherry jam simmers fresh cherries slowly",
        );
        let index = build_fruit_index(&file).await;

        let hits = index.search(&keyword_vector("cherry"), index.len());
        assert!(hits[0].node.text.contains("cherry"));
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn test_persist_and_load_round_trip() {
        let file = write_doc("apple pie recipes need tart apples");
        let index = build_fruit_index(&file).await;

        let dir = TempDir::new().unwrap();
        index.persist(dir.path()).unwrap();

        let loaded = VectorIndex::load(dir.path()).unwrap();
        assert_eq!(loaded.len(), index.len());
        assert_eq!(loaded.metadata.source_file, index.metadata.source_file);

        let hits = loaded.search(&keyword_vector("apple"), 1);
        assert!(hits[0].node.text.contains("apple"));
    }

    #[test]
    fn test_load_missing_index_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = VectorIndex::load(dir.path()).unwrap_err();
        assert!(matches!(err, RagError::IndexNotFound));
    }

    #[test]
    fn test_load_corrupt_index_is_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(INDEX_FILE), "not json").unwrap();

        let err = VectorIndex::load(dir.path()).unwrap_err();
        assert!(matches!(err, RagError::Index(_)));
    }
}
