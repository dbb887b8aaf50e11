//! SimpleRAG Index - Document loading, chunking, and vector search
//!
//! This crate owns the in-process index the service is built around:
//! - `loader` extracts plain text from uploaded files (PDF, DOCX, text)
//! - `splitter` breaks the text into fixed-size overlapping chunks
//! - `VectorIndex` holds embedded chunks, persists to a local directory,
//!   and answers brute-force cosine top-k searches
//! - `QueryEngine` ties retrieval to a chat model to synthesize answers
//!
//! The index is rebuilt from scratch on every upload; at most one index
//! exists per process, scoped to the most recently uploaded file.

pub mod index;
pub mod loader;
pub mod query;
pub mod splitter;

pub use index::{IndexMetadata, Node, ScoredNode, VectorIndex};
pub use query::{QueryEngine, DEFAULT_PROMPT_TEMPLATE};
pub use splitter::TextSplitter;
