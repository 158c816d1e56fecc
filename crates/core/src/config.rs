use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub chunking: ChunkingConfig,
    pub index: IndexConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            upload: UploadConfig::from_env(),
            chunking: ChunkingConfig::from_env(),
            index: IndexConfig::from_env(),
            llm: LlmConfig::from_env(),
            embedding: EmbeddingConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:    {}:{}", self.server.host, self.server.port);
        tracing::info!("  upload:    dir={}, max={}B", self.upload.dir.display(), self.upload.max_file_size);
        tracing::info!("  chunking:  size={}, overlap={}", self.chunking.chunk_size, self.chunking.chunk_overlap);
        tracing::info!("  index:     url={}, collection={}", self.index.url, self.index.collection);
        tracing::info!("  llm:       model={}, configured={}", self.llm.model, self.llm.is_configured());
        tracing::info!("  embedding: model={}, dims={}", self.embedding.model, self.embedding.dimensions);
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated allowed origins; empty = allow any.
    pub cors_origins: Option<String>,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 8000),
            cors_origins: env_opt("CORS_ORIGINS"),
        }
    }
}

// ── Uploads ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: PathBuf,
    /// Maximum accepted upload size in bytes (default 10 MiB).
    pub max_file_size: usize,
}

impl UploadConfig {
    fn from_env() -> Self {
        Self {
            dir: PathBuf::from(env_or("UPLOAD_DIR", "./uploads")),
            max_file_size: env_usize("MAX_FILE_SIZE", 10 * 1024 * 1024),
        }
    }
}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Character budget per chunk.
    pub chunk_size: usize,
    /// Character-oriented overlap budget between adjacent chunks.
    pub chunk_overlap: usize,
}

impl ChunkingConfig {
    fn from_env() -> Self {
        Self {
            chunk_size: env_usize("CHUNK_SIZE", 1000),
            chunk_overlap: env_usize("CHUNK_OVERLAP", 200),
        }
    }
}

// ── Semantic index service ────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    pub url: String,
    pub collection: String,
}

impl IndexConfig {
    fn from_env() -> Self {
        Self {
            url: env_or("INDEX_URL", "http://localhost:8100"),
            collection: env_or("INDEX_COLLECTION", "documents"),
        }
    }
}

// ── LLM (OpenRouter) ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl LlmConfig {
    fn from_env() -> Self {
        Self {
            api_key: env_opt("OPENROUTER_API_KEY"),
            model: env_or("MODEL_NAME", "meta-llama/llama-3.1-8b-instruct:free"),
            base_url: env_or("OPENROUTER_BASE_URL", "https://openrouter.ai/api"),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// ── Embeddings ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimensions: usize,
}

impl EmbeddingConfig {
    fn from_env() -> Self {
        Self {
            model: env_or("EMBEDDING_MODEL", "text-embedding-ada-002"),
            dimensions: env_usize("EMBEDDING_DIMENSIONS", 384),
        }
    }
}
