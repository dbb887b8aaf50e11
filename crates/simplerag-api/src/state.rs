//! Application state management

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use simplerag_core::{AppConfig, ChatModel, EmbeddingModel, RagError};
use simplerag_gemini::{GeminiChat, GeminiEmbedding};
use simplerag_index::{TextSplitter, VectorIndex};
use tokio::sync::RwLock;

/// Application state shared across handlers
///
/// Holds the process-wide index handle: at most one index exists per
/// process, or none. Uploads replace it wholesale.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
    /// Embedding provider
    pub embedder: Arc<dyn EmbeddingModel>,
    /// Chat completion provider
    pub llm: Arc<dyn ChatModel>,
    /// The resident index, if any
    pub index: RwLock<Option<Arc<VectorIndex>>>,
}

impl AppState {
    /// Create application state with Gemini-backed models
    pub fn new(config: AppConfig) -> Self {
        let embedder = Arc::new(GeminiEmbedding::from_config(&config.gemini));
        let llm = Arc::new(GeminiChat::from_config(&config.gemini));
        Self::with_models(config, embedder, llm)
    }

    /// Create application state with explicit models (used by tests)
    pub fn with_models(
        config: AppConfig,
        embedder: Arc<dyn EmbeddingModel>,
        llm: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            embedder,
            llm,
            index: RwLock::new(None),
        }
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Text splitter configured from the index settings
    pub fn splitter(&self) -> TextSplitter {
        TextSplitter::new(self.config.index.chunk_size, self.config.index.chunk_overlap)
    }

    /// Return the resident index, or try once to load it from storage
    pub async fn get_or_load_index(&self) -> Option<Arc<VectorIndex>> {
        if let Some(index) = self.index.read().await.clone() {
            return Some(index);
        }

        match VectorIndex::load(&self.config.storage.persist_dir) {
            Ok(index) => {
                tracing::info!("Loading index from storage...");
                let index = Arc::new(index);
                *self.index.write().await = Some(index.clone());
                Some(index)
            }
            Err(RagError::IndexNotFound) => None,
            Err(e) => {
                tracing::error!("Error loading index: {e}");
                None
            }
        }
    }

    /// Install a freshly built index, discarding the previous one
    pub async fn set_index(&self, index: Arc<VectorIndex>) {
        *self.index.write().await = Some(index);
    }

    /// Whether an index is resident in memory
    pub async fn has_index(&self) -> bool {
        self.index.read().await.is_some()
    }
}
