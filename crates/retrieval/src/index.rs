use async_trait::async_trait;
use docvoice_core::DocumentMetadata;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("index service error: {0}")]
    Service(String),
}

/// One entry shipped to the semantic index.
#[derive(Debug, Clone)]
pub struct IndexItem {
    pub id: String,
    pub text: String,
    pub embedding: Vec<f32>,
    pub metadata: DocumentMetadata,
}

/// Seam to the external semantic index service. The service owns persistence
/// and query-time embedding; this trait only moves data across the wire.
#[async_trait]
pub trait SemanticIndex: Send + Sync {
    /// Add a batch of items in one request. Atomicity across the batch is
    /// whatever the service provides.
    async fn add(&self, items: Vec<IndexItem>) -> Result<(), IndexError>;

    /// Return up to `n_results` stored texts, most relevant to `text` first.
    async fn query(&self, text: &str, n_results: usize) -> Result<Vec<String>, IndexError>;

    /// Destroy and recreate the namespace.
    async fn delete_namespace(&self) -> Result<(), IndexError>;

    /// Number of items currently indexed.
    async fn count(&self) -> Result<usize, IndexError>;
}
