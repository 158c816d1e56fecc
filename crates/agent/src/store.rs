//! Per-conversation turn history.
//!
//! Conversations are keyed by an opaque token, created lazily on first
//! append, and live until explicitly deleted. The store is the seam a
//! persistent backend would plug into.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use docvoice_llm::Message;

/// Turn history access, partitioned by conversation token.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// The most recent `limit` turns of a conversation, oldest first.
    /// Unknown tokens yield an empty history.
    async fn recent(&self, token: &str, limit: usize) -> Vec<Message>;

    /// Append a user turn and the assistant's answer as one atomic exchange.
    /// Two concurrent calls on the same token may order their exchanges
    /// either way, but a user turn is never separated from its answer.
    async fn append_exchange(&self, token: &str, user: Message, assistant: Message);

    /// Drop a conversation entirely; the token behaves as new afterwards.
    async fn delete(&self, token: &str);

    /// Number of live conversations.
    async fn conversation_count(&self) -> usize;
}

/// In-memory store: one map from token to turn list behind a single mutex.
#[derive(Default)]
pub struct MemoryConversationStore {
    conversations: Mutex<HashMap<String, Vec<Message>>>,
}

impl MemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full turn count for a token (the complete sequence is retained even
    /// though prompts only read a bounded window).
    pub async fn turn_count(&self, token: &str) -> usize {
        self.conversations
            .lock()
            .await
            .get(token)
            .map_or(0, |turns| turns.len())
    }
}

#[async_trait]
impl ConversationStore for MemoryConversationStore {
    async fn recent(&self, token: &str, limit: usize) -> Vec<Message> {
        let conversations = self.conversations.lock().await;
        match conversations.get(token) {
            Some(turns) => {
                let skip = turns.len().saturating_sub(limit);
                turns[skip..].to_vec()
            }
            None => Vec::new(),
        }
    }

    async fn append_exchange(&self, token: &str, user: Message, assistant: Message) {
        let mut conversations = self.conversations.lock().await;
        let turns = conversations.entry(token.to_string()).or_default();
        turns.push(user);
        turns.push(assistant);
    }

    async fn delete(&self, token: &str) {
        self.conversations.lock().await.remove(token);
    }

    async fn conversation_count(&self) -> usize {
        self.conversations.lock().await.len()
    }
}
