//! Real-time channel: voice input over WebSocket.
//!
//! The protocol is request/reply per client message: `voice_input` produces
//! typing markers around a `voice_response`, `ping` produces `pong`. The
//! assistant never raises, so `error` frames only cover unparseable client
//! messages.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::state::AppState;

// ── WebSocket messages ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    VoiceInput {
        transcript: String,
        #[serde(default)]
        conversation_id: Option<String>,
    },
    Ping,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ServerMessage {
    System {
        message: String,
        timestamp: String,
    },
    Typing {
        status: bool,
    },
    VoiceResponse {
        transcript: String,
        response: String,
        conversation_id: String,
        timestamp: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Pong {
        timestamp: String,
    },
    Error {
        message: String,
    },
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

async fn send(socket: &mut WebSocket, message: &ServerMessage) -> Result<(), axum::Error> {
    let text = serde_json::to_string(message).unwrap_or_default();
    socket.send(Message::Text(text.into())).await
}

// ── Handler ─────────────────────────────────────────────────────

pub async fn ws_upgrade(
    ws: WebSocketUpgrade,
    Path(client_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, client_id, state))
}

async fn handle_ws(mut socket: WebSocket, client_id: String, state: Arc<AppState>) {
    state.connections.write().await.insert(client_id.clone());
    info!("client {client_id} connected");

    let welcome = ServerMessage::System {
        message: "Connected to the document assistant".to_string(),
        timestamp: now(),
    };
    if send(&mut socket, &welcome).await.is_ok() {
        while let Some(Ok(message)) = socket.recv().await {
            match message {
                Message::Text(text) => {
                    if handle_client_message(&mut socket, &state, &text).await.is_err() {
                        break;
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    }

    state.connections.write().await.remove(&client_id);
    info!("client {client_id} disconnected");
}

async fn handle_client_message(
    socket: &mut WebSocket,
    state: &Arc<AppState>,
    text: &str,
) -> Result<(), axum::Error> {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::VoiceInput {
            transcript,
            conversation_id,
        }) => {
            send(socket, &ServerMessage::Typing { status: true }).await?;

            let reply = state.assistant.respond(&transcript, conversation_id).await;
            let response = ServerMessage::VoiceResponse {
                transcript,
                response: reply.response,
                conversation_id: reply.conversation_id,
                timestamp: now(),
                error: reply.error,
            };
            send(socket, &response).await?;

            send(socket, &ServerMessage::Typing { status: false }).await
        }
        Ok(ClientMessage::Ping) => send(socket, &ServerMessage::Pong { timestamp: now() }).await,
        Err(e) => {
            warn!("unparseable client message: {e}");
            send(
                socket,
                &ServerMessage::Error {
                    message: format!("Invalid message: {e}"),
                },
            )
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_input_parses_with_and_without_conversation_id() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type": "voice_input", "transcript": "hello", "conversation_id": "c1"}"#,
        )
        .unwrap();
        assert!(matches!(
            msg,
            ClientMessage::VoiceInput { ref transcript, conversation_id: Some(_) }
                if transcript == "hello"
        ));

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type": "voice_input", "transcript": "hello"}"#).unwrap();
        assert!(matches!(
            msg,
            ClientMessage::VoiceInput { conversation_id: None, .. }
        ));
    }

    #[test]
    fn ping_parses() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type": "dance"}"#).is_err());
    }

    #[test]
    fn server_messages_carry_snake_case_tags() {
        let json = serde_json::to_string(&ServerMessage::Typing { status: true }).unwrap();
        assert_eq!(json, r#"{"type":"typing","status":true}"#);

        let json = serde_json::to_string(&ServerMessage::VoiceResponse {
            transcript: "q".to_string(),
            response: "a".to_string(),
            conversation_id: "c".to_string(),
            timestamp: "t".to_string(),
            error: None,
        })
        .unwrap();
        assert!(json.starts_with(r#"{"type":"voice_response""#));
        assert!(!json.contains("error"));
    }
}
