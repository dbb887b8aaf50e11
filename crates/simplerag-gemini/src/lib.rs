//! SimpleRAG Gemini - Hosted model provider clients
//!
//! Thin reqwest wrappers over the Google Generative Language API:
//! - `GeminiEmbedding` implements `simplerag_core::EmbeddingModel`
//! - `GeminiChat` implements `simplerag_core::ChatModel`
//!
//! Both clients take the API key as a query parameter, per the provider's
//! convention, and fail at call time when no key is configured so the
//! service can start without one.

pub mod chat;
pub mod embedding;

pub use chat::GeminiChat;
pub use embedding::GeminiEmbedding;
