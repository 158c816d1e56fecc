use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use docvoice_core::DocumentMetadata;
use docvoice_ingest::embedding::ResilientEmbedder;

use crate::index::{IndexError, IndexItem, SemanticIndex};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("index write failed: {0}")]
    IndexWrite(#[source] IndexError),

    #[error("index clear failed: {0}")]
    IndexClear(#[source] IndexError),
}

/// Front door to the semantic index: assigns chunk ids, fans metadata out,
/// embeds chunks, and tracks whether anything has been indexed so retrieval
/// can short-circuit on an empty index.
pub struct RetrievalGateway {
    index: Arc<dyn SemanticIndex>,
    embedder: ResilientEmbedder,
    has_content: AtomicBool,
}

impl RetrievalGateway {
    pub fn new(index: Arc<dyn SemanticIndex>, embedder: ResilientEmbedder) -> Self {
        Self {
            index,
            embedder,
            has_content: AtomicBool::new(false),
        }
    }

    /// Index a batch of chunk texts, attaching `metadata` to every chunk.
    ///
    /// Ids are sequential within the call (`doc_0..doc_{n-1}`). The batch is
    /// shipped in a single request; if the service fails mid-batch, whether
    /// earlier chunks were written depends on its own atomicity. There is no
    /// rollback here.
    pub async fn add(
        &self,
        texts: Vec<String>,
        metadata: DocumentMetadata,
    ) -> Result<(), GatewayError> {
        let refs: Vec<&str> = texts.iter().map(|t| t.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&refs).await;

        let items: Vec<IndexItem> = texts
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (text, embedding))| IndexItem {
                id: format!("doc_{i}"),
                text,
                embedding,
                metadata: metadata.clone(),
            })
            .collect();

        let count = items.len();
        self.index.add(items).await.map_err(GatewayError::IndexWrite)?;
        self.has_content.store(true, Ordering::Release);
        info!("indexed {count} chunks");
        Ok(())
    }

    /// Return up to `k` relevant chunk texts, most relevant first.
    ///
    /// Retrieval is best-effort: an empty index or a failing query yields an
    /// empty result, never an error.
    pub async fn search(&self, query: &str, k: usize) -> Vec<String> {
        if !self.has_content.load(Ordering::Acquire) {
            return Vec::new();
        }

        let available = self.count().await;
        if available == 0 {
            return Vec::new();
        }

        match self.index.query(query, k.min(available)).await {
            Ok(documents) => documents,
            Err(e) => {
                warn!("index query failed, continuing without context: {e}");
                Vec::new()
            }
        }
    }

    /// Destroy and recreate the index namespace. Unlike `search`, failures
    /// here are surfaced: the caller explicitly asked for a state change.
    pub async fn clear(&self) -> Result<(), GatewayError> {
        self.index
            .delete_namespace()
            .await
            .map_err(GatewayError::IndexClear)?;
        self.has_content.store(false, Ordering::Release);
        info!("index cleared");
        Ok(())
    }

    /// Best-effort item count; 0 when the index is unreachable.
    pub async fn count(&self) -> usize {
        match self.index.count().await {
            Ok(n) => n,
            Err(e) => {
                warn!("index count failed: {e}");
                0
            }
        }
    }

    pub fn has_documents(&self) -> bool {
        self.has_content.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockIndex {
        items: Mutex<Vec<IndexItem>>,
        last_query: Mutex<Option<(String, usize)>>,
        fail_add: bool,
        fail_query: bool,
        fail_clear: bool,
        fail_count: bool,
    }

    #[async_trait]
    impl SemanticIndex for MockIndex {
        async fn add(&self, items: Vec<IndexItem>) -> Result<(), IndexError> {
            if self.fail_add {
                return Err(IndexError::Service("write refused".into()));
            }
            self.items.lock().unwrap().extend(items);
            Ok(())
        }

        async fn query(&self, text: &str, n_results: usize) -> Result<Vec<String>, IndexError> {
            *self.last_query.lock().unwrap() = Some((text.to_string(), n_results));
            if self.fail_query {
                return Err(IndexError::Service("query refused".into()));
            }
            let items = self.items.lock().unwrap();
            Ok(items.iter().take(n_results).map(|i| i.text.clone()).collect())
        }

        async fn delete_namespace(&self) -> Result<(), IndexError> {
            if self.fail_clear {
                return Err(IndexError::Service("clear refused".into()));
            }
            self.items.lock().unwrap().clear();
            Ok(())
        }

        async fn count(&self) -> Result<usize, IndexError> {
            if self.fail_count {
                return Err(IndexError::Service("unreachable".into()));
            }
            Ok(self.items.lock().unwrap().len())
        }
    }

    fn gateway_with(index: Arc<MockIndex>) -> RetrievalGateway {
        RetrievalGateway::new(index, ResilientEmbedder::new(None, 16))
    }

    fn meta(filename: &str) -> DocumentMetadata {
        DocumentMetadata::from([("filename".to_string(), filename.to_string())])
    }

    #[tokio::test]
    async fn search_on_empty_index_returns_empty_without_error() {
        let gateway = gateway_with(Arc::new(MockIndex::default()));
        assert!(gateway.search("anything", 3).await.is_empty());
        assert!(!gateway.has_documents());
    }

    #[tokio::test]
    async fn add_assigns_sequential_ids_and_shared_metadata() {
        let index = Arc::new(MockIndex::default());
        let gateway = gateway_with(index.clone());

        gateway
            .add(
                vec!["first chunk".to_string(), "second chunk".to_string()],
                meta("report.pdf"),
            )
            .await
            .unwrap();

        let items = index.items.lock().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "doc_0");
        assert_eq!(items[1].id, "doc_1");
        for item in items.iter() {
            assert_eq!(item.metadata.get("filename").unwrap(), "report.pdf");
            assert_eq!(item.embedding.len(), 16);
        }
        assert!(gateway.has_documents());
    }

    #[tokio::test]
    async fn add_failure_is_surfaced_and_leaves_state_empty() {
        let index = Arc::new(MockIndex {
            fail_add: true,
            ..Default::default()
        });
        let gateway = gateway_with(index);

        let err = gateway
            .add(vec!["chunk".to_string()], meta("f.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::IndexWrite(_)));
        assert!(!gateway.has_documents());
    }

    #[tokio::test]
    async fn search_clamps_k_to_indexed_count() {
        let index = Arc::new(MockIndex::default());
        let gateway = gateway_with(index.clone());
        gateway
            .add(
                vec!["a".to_string(), "b".to_string()],
                DocumentMetadata::new(),
            )
            .await
            .unwrap();

        let results = gateway.search("query", 5).await;
        assert_eq!(results.len(), 2);
        let recorded = index.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(recorded, ("query".to_string(), 2));
    }

    #[tokio::test]
    async fn query_failure_degrades_to_empty() {
        let index = Arc::new(MockIndex {
            fail_query: true,
            ..Default::default()
        });
        let gateway = gateway_with(index.clone());
        gateway
            .add(vec!["a".to_string()], DocumentMetadata::new())
            .await
            .unwrap();

        assert!(gateway.search("query", 3).await.is_empty());
    }

    #[tokio::test]
    async fn clear_resets_state_and_surfaces_failures() {
        let index = Arc::new(MockIndex::default());
        let gateway = gateway_with(index.clone());
        gateway
            .add(vec!["a".to_string()], DocumentMetadata::new())
            .await
            .unwrap();
        assert!(gateway.has_documents());

        gateway.clear().await.unwrap();
        assert!(!gateway.has_documents());
        assert_eq!(gateway.count().await, 0);

        let failing = gateway_with(Arc::new(MockIndex {
            fail_clear: true,
            ..Default::default()
        }));
        assert!(matches!(
            failing.clear().await.unwrap_err(),
            GatewayError::IndexClear(_)
        ));
    }

    #[tokio::test]
    async fn count_is_best_effort_zero_when_unreachable() {
        let gateway = gateway_with(Arc::new(MockIndex {
            fail_count: true,
            ..Default::default()
        }));
        assert_eq!(gateway.count().await, 0);
    }

    #[tokio::test]
    async fn upload_pipeline_indexes_every_chunk() {
        use docvoice_ingest::chunker::{split_text, ChunkConfig};

        let text = "Page 1. It has two sentences! Page 2 continues here.";
        let chunks = split_text(
            text,
            &ChunkConfig {
                max_size: 20,
                overlap: 0,
            },
        );
        assert!(chunks.len() >= 2);

        let index = Arc::new(MockIndex::default());
        let gateway = gateway_with(index.clone());
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        gateway.add(texts, meta("pages.pdf")).await.unwrap();

        let items = index.items.lock().unwrap();
        assert_eq!(items.len(), chunks.len());
        for item in items.iter() {
            assert!(!item.text.trim().is_empty());
        }
    }
}
