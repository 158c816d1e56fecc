use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use docvoice_core::DocumentMetadata;

use crate::index::{IndexError, IndexItem, SemanticIndex};

/// Client for a Chroma-style REST index service.
///
/// The service persists the collection to durable local storage across its
/// own restarts; this client is stateless.
pub struct HttpSemanticIndex {
    client: Client,
    base_url: String,
    collection: String,
}

impl HttpSemanticIndex {
    pub fn new(base_url: String, collection: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            collection,
        }
    }

    fn collection_url(&self, suffix: &str) -> String {
        format!("{}/collections/{}{}", self.base_url, self.collection, suffix)
    }
}

#[derive(Serialize)]
struct AddRequest {
    ids: Vec<String>,
    documents: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    metadatas: Vec<DocumentMetadata>,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query_text: &'a str,
    n_results: usize,
}

#[derive(Deserialize)]
struct QueryResponse {
    documents: Vec<String>,
}

#[derive(Deserialize)]
struct CountResponse {
    count: usize,
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, IndexError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(IndexError::Service(format!("{status}: {body}")))
}

#[async_trait]
impl SemanticIndex for HttpSemanticIndex {
    async fn add(&self, items: Vec<IndexItem>) -> Result<(), IndexError> {
        let mut request = AddRequest {
            ids: Vec::with_capacity(items.len()),
            documents: Vec::with_capacity(items.len()),
            embeddings: Vec::with_capacity(items.len()),
            metadatas: Vec::with_capacity(items.len()),
        };
        for item in items {
            request.ids.push(item.id);
            request.documents.push(item.text);
            request.embeddings.push(item.embedding);
            request.metadatas.push(item.metadata);
        }

        let response = self
            .client
            .post(self.collection_url("/add"))
            .json(&request)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn query(&self, text: &str, n_results: usize) -> Result<Vec<String>, IndexError> {
        let response = self
            .client
            .post(self.collection_url("/query"))
            .json(&QueryRequest {
                query_text: text,
                n_results,
            })
            .send()
            .await?;
        let response = check_status(response).await?;
        let decoded: QueryResponse = response.json().await?;
        Ok(decoded.documents)
    }

    async fn delete_namespace(&self) -> Result<(), IndexError> {
        let response = self
            .client
            .delete(self.collection_url(""))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn count(&self) -> Result<usize, IndexError> {
        let response = self
            .client
            .get(self.collection_url("/count"))
            .send()
            .await?;
        let response = check_status(response).await?;
        let decoded: CountResponse = response.json().await?;
        Ok(decoded.count)
    }
}
