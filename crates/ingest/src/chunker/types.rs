//! Chunk configuration and output types.

use docvoice_core::config::ChunkingConfig;

/// Configuration for the chunking engine.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Character budget per chunk (default: 1000).
    pub max_size: usize,
    /// Character-oriented overlap budget between adjacent chunks
    /// (default: 200).
    pub overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_size: 1000,
            overlap: 200,
        }
    }
}

impl From<&ChunkingConfig> for ChunkConfig {
    fn from(c: &ChunkingConfig) -> Self {
        Self {
            max_size: c.chunk_size,
            overlap: c.chunk_overlap,
        }
    }
}

/// A chunk of document text. Immutable once produced; `index` is the ordinal
/// position within the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub content: String,
}
