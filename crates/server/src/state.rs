use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use docvoice_agent::Assistant;
use docvoice_core::Config;
use docvoice_retrieval::RetrievalGateway;

pub struct AppState {
    pub config: Config,
    pub gateway: Arc<RetrievalGateway>,
    pub assistant: Arc<Assistant>,
    /// Ids of live WebSocket clients, for the stats endpoint.
    pub connections: RwLock<HashSet<String>>,
}
