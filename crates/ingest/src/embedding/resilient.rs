use std::sync::Arc;

use tracing::warn;

use super::fallback::fallback_embedding;
use super::traits::Embedder;

/// Embedder that never fails: delegates to a remote backend when one is
/// configured and substitutes deterministic fallback vectors for the whole
/// batch on any error. Fallback vectors land in the same index as model
/// vectors, untagged.
pub struct ResilientEmbedder {
    remote: Option<Arc<dyn Embedder>>,
    dimensions: usize,
}

impl ResilientEmbedder {
    pub fn new(remote: Option<Arc<dyn Embedder>>, dimensions: usize) -> Self {
        Self { remote, dimensions }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Embed a batch, degrading to fallback vectors instead of erroring.
    pub async fn embed_batch(&self, texts: &[&str]) -> Vec<Vec<f32>> {
        if let Some(remote) = &self.remote {
            match remote.embed_batch(texts).await {
                Ok(vectors) => return vectors,
                Err(e) => {
                    warn!("remote embedding failed, using fallback vectors: {e}");
                }
            }
        }
        texts
            .iter()
            .map(|t| fallback_embedding(t, self.dimensions))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::traits::{Embedder, EmbeddingError};
    use async_trait::async_trait;

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Err(EmbeddingError::Api("503: unavailable".to_string()))
        }

        fn dimensions(&self) -> usize {
            384
        }
    }

    #[tokio::test]
    async fn degrades_to_fallback_on_remote_failure() {
        let embedder = ResilientEmbedder::new(Some(Arc::new(FailingEmbedder)), 384);
        let vectors = embedder.embed_batch(&["hello", "world"]).await;
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0], fallback_embedding("hello", 384));
        assert_eq!(vectors[1], fallback_embedding("world", 384));
    }

    #[tokio::test]
    async fn falls_back_directly_without_remote() {
        let embedder = ResilientEmbedder::new(None, 384);
        let vectors = embedder.embed_batch(&["hello"]).await;
        assert_eq!(vectors, vec![fallback_embedding("hello", 384)]);
    }
}
