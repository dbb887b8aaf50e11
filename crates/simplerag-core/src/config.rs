//! SimpleRAG Configuration Management
//!
//! Handles configuration from environment variables with sensible
//! defaults for development.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Local filesystem layout
    pub storage: StorageConfig,

    /// Gemini provider configuration
    pub gemini: GeminiConfig,

    /// Index construction configuration
    pub index: IndexConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("API_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("API_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT".to_string(),
                value: port,
            })?;
        }

        // CORS origins (comma-separated)
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            config.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Storage
        if let Ok(dir) = std::env::var("DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("PERSIST_DIR") {
            config.storage.persist_dir = PathBuf::from(dir);
        }

        // Gemini
        if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
            if !key.trim().is_empty() {
                config.gemini.api_key = Some(key);
            }
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.gemini.model = model;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.gemini.embedding_model = model;
        }

        // Index
        if let Ok(top_k) = std::env::var("TOP_K") {
            config.index.top_k = top_k.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TOP_K".to_string(),
                value: top_k,
            })?;
        }

        Ok(config)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_body_size: usize,

    /// Allowed origins for CORS
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_body_size: 10 * 1024 * 1024, // 10MB
            // Vite and React dev servers
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

/// Local filesystem layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for uploaded source files
    pub data_dir: PathBuf,

    /// Directory for the persisted index
    pub persist_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            persist_dir: PathBuf::from("./storage"),
        }
    }
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; absence degrades chat/upload to request-time failures
    pub api_key: Option<String>,

    /// Chat model name
    pub model: String,

    /// Embedding model name
    pub embedding_model: String,

    /// API base URL (overridable for tests)
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "models/gemini-1.5-flash".to_string(),
            embedding_model: "models/text-embedding-004".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

/// Index construction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Chunk size in characters
    pub chunk_size: usize,

    /// Overlap between consecutive chunks
    pub chunk_overlap: usize,

    /// Number of chunks retrieved per query
    pub top_k: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 5,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Process environment is shared; serialize the tests that touch it
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvGuard(&'static str);

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            std::env::set_var(key, value);
            Self(key)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            std::env::remove_var(self.0);
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
        assert_eq!(config.storage.persist_dir, PathBuf::from("./storage"));
        assert_eq!(config.gemini.embedding_model, "models/text-embedding-004");
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_default_cors_origins() {
        let config = ServerConfig::default();
        assert!(config
            .cors_origins
            .contains(&"http://localhost:5173".to_string()));
        assert!(config
            .cors_origins
            .contains(&"http://localhost:3000".to_string()));
    }

    #[test]
    fn test_default_index_config() {
        let config = IndexConfig::default();
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.chunk_overlap, 200);
        assert_eq!(config.top_k, 5);
    }

    #[test]
    fn test_from_env_overrides() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _port = EnvGuard::set("API_PORT", "9090");
        let _top_k = EnvGuard::set("TOP_K", "3");
        let _origins = EnvGuard::set("CORS_ORIGINS", "http://a.example, http://b.example ,");
        let _persist = EnvGuard::set("PERSIST_DIR", "/tmp/rag-storage");

        let config = AppConfig::from_env().unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.index.top_k, 3);
        assert_eq!(
            config.server.cors_origins,
            vec!["http://a.example".to_string(), "http://b.example".to_string()]
        );
        assert_eq!(config.storage.persist_dir, PathBuf::from("/tmp/rag-storage"));
    }

    #[test]
    fn test_from_env_invalid_port_is_error() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _port = EnvGuard::set("API_PORT", "not-a-port");

        let ConfigError::InvalidValue { key, value } = AppConfig::from_env().unwrap_err();
        assert_eq!(key, "API_PORT");
        assert_eq!(value, "not-a-port");
    }

    #[test]
    fn test_from_env_invalid_top_k_is_error() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _top_k = EnvGuard::set("TOP_K", "many");

        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_from_env_blank_api_key_stays_unset() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _key = EnvGuard::set("GOOGLE_API_KEY", "   ");

        let config = AppConfig::from_env().unwrap();
        assert!(config.gemini.api_key.is_none());
    }
}
