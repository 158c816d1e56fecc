//! REST handlers: upload, chat, clear, stats, health.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use docvoice_core::DocumentMetadata;
use docvoice_ingest::chunker::{self, ChunkConfig};
use docvoice_ingest::document::{self, ExtractionError};

use crate::state::AppState;

// ── Request/Response types ────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub pages: usize,
    pub chunks: usize,
    pub message: String,
}

// ── GET / ─────────────────────────────────────────

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "status": "online",
        "service": "docvoice",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ── GET /health ───────────────────────────────────

pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "components": {
            "index": state.gateway.has_documents(),
            "assistant": true,
            "extractor": true,
        },
    }))
}

// ── POST /upload ──────────────────────────────────

/// Accept a multipart PDF upload: persist the file, extract its text, chunk
/// it, and index the chunks with the filename attached as metadata.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {e}")))?
        .ok_or((StatusCode::BAD_REQUEST, "No file provided".to_string()))?;

    let filename = field.file_name().unwrap_or("unnamed").to_string();
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err((
            StatusCode::BAD_REQUEST,
            "Only PDF files are allowed".to_string(),
        ));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read file: {e}")))?;

    let max_size = state.config.upload.max_file_size;
    if bytes.len() > max_size {
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("File size exceeds {}MB limit", max_size / 1024 / 1024),
        ));
    }

    // Strip any path components from the client-supplied name before writing.
    let safe_name = Path::new(&filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed.pdf")
        .to_string();
    let file_path = state.config.upload.dir.join(&safe_name);
    tokio::fs::write(&file_path, &bytes).await.map_err(|e| {
        error!("failed to persist upload {}: {e}", file_path.display());
        (StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to save file: {e}"))
    })?;

    let doc = document::extract_text(&bytes, &filename).map_err(|e| match e {
        ExtractionError::EmptyDocument => (
            StatusCode::BAD_REQUEST,
            format!(
                "Document '{filename}' contains no extractable text. \
                 Ensure the PDF has a text layer (scanned/image PDFs are not supported)."
            ),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Text extraction failed: {other}"),
        ),
    })?;

    let config = ChunkConfig::from(&state.config.chunking);
    let chunks = chunker::split_text(&doc.full_text(), &config);
    if chunks.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Document '{filename}' produced no chunks"),
        ));
    }

    info!(
        "processing '{}': {} pages, {} chunks",
        filename,
        doc.page_count(),
        chunks.len()
    );

    let texts: Vec<String> = chunks.into_iter().map(|c| c.content).collect();
    let chunk_count = texts.len();
    let metadata = DocumentMetadata::from([("filename".to_string(), filename.clone())]);

    state.gateway.add(texts, metadata).await.map_err(|e| {
        error!("failed to index '{filename}': {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, format!("Error processing PDF: {e}"))
    })?;

    Ok(Json(UploadResponse {
        success: true,
        filename: filename.clone(),
        pages: doc.page_count(),
        chunks: chunk_count,
        message: format!("Successfully processed {filename}"),
    }))
}

// ── POST /chat ────────────────────────────────────

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let reply = state
        .assistant
        .respond(&request.message, request.conversation_id)
        .await;

    Json(ChatResponse {
        response: reply.response,
        conversation_id: reply.conversation_id,
        timestamp: Utc::now().to_rfc3339(),
        error: reply.error,
    })
}

// ── DELETE /clear ─────────────────────────────────

pub async fn clear_index(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    state.gateway.clear().await.map_err(|e| {
        error!("failed to clear index: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error clearing index: {e}"),
        )
    })?;

    Ok(Json(json!({
        "success": true,
        "message": "Document index cleared",
    })))
}

// ── GET /stats ────────────────────────────────────

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "active_connections": state.connections.read().await.len(),
        "documents_count": state.gateway.count().await,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
