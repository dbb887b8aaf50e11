//! Query engine: retrieval plus answer synthesis
//!
//! Embeds the user's question, retrieves the most similar chunks from
//! the index, and asks the chat model to answer from that context.

use std::sync::Arc;

use simplerag_core::{ChatModel, EmbeddingModel, Result};

use crate::index::VectorIndex;

/// Default answer-synthesis prompt
pub const DEFAULT_PROMPT_TEMPLATE: &str = "\
Context information is below.
---------------------
{context}
---------------------
Given the context information and not prior knowledge, answer the query.
Query: {query}
Answer: ";

/// Retrieves relevant chunks and synthesizes an answer
pub struct QueryEngine {
    index: Arc<VectorIndex>,
    embedder: Arc<dyn EmbeddingModel>,
    llm: Arc<dyn ChatModel>,
    top_k: usize,
    prompt_template: String,
}

impl QueryEngine {
    /// Create a query engine over an index
    pub fn new(
        index: Arc<VectorIndex>,
        embedder: Arc<dyn EmbeddingModel>,
        llm: Arc<dyn ChatModel>,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            embedder,
            llm,
            top_k,
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }

    /// Replace the prompt template
    ///
    /// The template must contain `{context}` and `{query}` placeholders.
    pub fn with_prompt_template(mut self, template: impl Into<String>) -> Self {
        self.prompt_template = template.into();
        self
    }

    /// Answer a query against the index
    pub async fn query(&self, query: &str) -> Result<String> {
        let query_embedding = self.embedder.embed_query(query).await?;

        let hits = self.index.search(&query_embedding, self.top_k);
        tracing::debug!(hits = hits.len(), "Retrieved context chunks");

        let context = hits
            .iter()
            .map(|hit| hit.node.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = self
            .prompt_template
            .replace("{context}", &context)
            .replace("{query}", query);

        self.llm.complete(&prompt).await
    }
}
