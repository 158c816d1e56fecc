//! Deterministic hash-based embedding, used when the remote call fails.
//!
//! This is a content hash, not a semantic embedding: similarity search over
//! these vectors is expected to be weak, and callers must treat it purely as
//! a resilience measure.

use sha2::{Digest, Sha256};

/// Default vector dimensionality, matching the remote model.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Produce a deterministic, L2-normalized vector of length `dim` from `text`.
///
/// Consecutive 2-byte big-endian windows of the SHA-256 digest are packed
/// into `[0, 1]`; positions past digest exhaustion are zero. Identical text
/// always yields a bit-identical vector.
pub fn fallback_embedding(text: &str, dim: usize) -> Vec<f32> {
    let digest = Sha256::digest(text.as_bytes());

    let mut embedding: Vec<f32> = digest
        .chunks_exact(2)
        .take(dim)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]) as f32 / 65535.0)
        .collect();
    embedding.resize(dim, 0.0);

    let norm = embedding.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut embedding {
            *v /= norm;
        }
    }
    embedding
}
