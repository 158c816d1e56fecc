mod api;
mod router;
mod state;
mod ws;

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::RwLock;
use tracing::{info, warn};

use docvoice_agent::{Assistant, MemoryConversationStore};
use docvoice_core::Config;
use docvoice_ingest::embedding::{Embedder, RemoteEmbedder, ResilientEmbedder};
use docvoice_llm::{LlmProvider, OpenRouterProvider};
use docvoice_retrieval::{HttpSemanticIndex, RetrievalGateway};

use state::AppState;

fn build_app_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let api_key = config
        .llm
        .api_key
        .clone()
        .context("OPENROUTER_API_KEY is required")?;

    let index = Arc::new(HttpSemanticIndex::new(
        config.index.url.clone(),
        config.index.collection.clone(),
    ));

    let remote: Arc<dyn Embedder> = Arc::new(RemoteEmbedder::new(
        api_key.clone(),
        config.embedding.model.clone(),
        config.llm.base_url.clone(),
        config.embedding.dimensions,
    ));
    let embedder = ResilientEmbedder::new(Some(remote), config.embedding.dimensions);
    let gateway = Arc::new(RetrievalGateway::new(index, embedder));

    let provider: Arc<dyn LlmProvider> = Arc::new(OpenRouterProvider::new(
        api_key,
        config.llm.model.clone(),
        config.llm.base_url.clone(),
    ));
    info!("assistant ready (model: {})", config.llm.model);

    let store = Arc::new(MemoryConversationStore::new());
    let assistant = Arc::new(Assistant::new(provider, gateway.clone(), store));

    Ok(Arc::new(AppState {
        config,
        gateway,
        assistant,
        connections: RwLock::new(HashSet::new()),
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    docvoice_core::config::load_dotenv();
    let config = Config::from_env();
    config.log_summary();

    std::fs::create_dir_all(&config.upload.dir).with_context(|| {
        format!("failed to create upload dir: {}", config.upload.dir.display())
    })?;

    if config.index.url.contains("localhost") {
        warn!("index service on localhost, make sure it is running before uploading");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_app_state(config)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
