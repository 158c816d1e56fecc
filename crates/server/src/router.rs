//! HTTP router construction.
//!
//! Assembles all Axum routes and middleware into a single `Router`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use docvoice_core::config::ServerConfig;

use crate::state::AppState;
use crate::{api, ws};

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server);
    // Slack over the file limit so multipart framing doesn't trip the body cap
    // before the handler's own size check runs.
    let body_limit = state.config.upload.max_file_size + 64 * 1024;

    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/upload", post(api::upload))
        .route("/chat", post(api::chat))
        .route("/ws/{client_id}", get(ws::ws_upgrade))
        .route("/clear", delete(api::clear_index))
        .route("/stats", get(api::stats))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    match &config.cors_origins {
        Some(origins) => {
            let parsed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parsed))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    }
}
