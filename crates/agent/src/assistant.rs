//! Conversation context assembly.
//!
//! Merges the system prompt, a bounded slice of conversation history, and
//! retrieved document excerpts into a single completion request, and
//! normalizes provider failures into a degraded user-facing answer.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use docvoice_llm::{LlmProvider, Message, SamplingConfig};
use docvoice_retrieval::RetrievalGateway;

use crate::store::ConversationStore;

/// Turns read from history when building a prompt. The full sequence is
/// retained in the store.
const HISTORY_WINDOW: usize = 6;

/// Retrieved excerpts folded into the prompt.
const CONTEXT_CHUNKS: usize = 3;

const SYSTEM_PROMPT: &str = "\
You are an intelligent assistant that helps users analyze and understand PDF documents through natural conversation.

Your capabilities:
- Answer questions about uploaded PDF documents with high accuracy
- Provide summaries and insights from document content
- Engage in natural, friendly conversation
- Cite specific information from the documents when relevant

Guidelines:
- Be concise but informative
- If you don't know something, admit it honestly
- When answering from documents, mention that you're referencing the uploaded content
- Be helpful, friendly, and professional";

const FALLBACK_ANSWER: &str = "I apologize, but I'm having trouble connecting to my \
language model right now. Please try again in a moment.";

/// Outcome of one message. Always produced: provider failures surface in
/// `error`, never as a panic or a propagated error.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub response: String,
    pub conversation_id: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct Assistant {
    provider: Arc<dyn LlmProvider>,
    gateway: Arc<RetrievalGateway>,
    store: Arc<dyn ConversationStore>,
    sampling: SamplingConfig,
}

impl Assistant {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        gateway: Arc<RetrievalGateway>,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            provider,
            gateway,
            store,
            sampling: SamplingConfig::default(),
        }
    }

    /// Answer `message` within the conversation identified by
    /// `conversation_id`, generating a fresh token when absent.
    pub async fn respond(&self, message: &str, conversation_id: Option<String>) -> Reply {
        let conversation_id =
            conversation_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        // Best-effort retrieval; a failing or empty index means no context.
        let context = self.gateway.search(message, CONTEXT_CHUNKS).await;

        let mut messages = vec![Message::system(SYSTEM_PROMPT)];
        messages.extend(self.store.recent(&conversation_id, HISTORY_WINDOW).await);
        messages.push(Message::user(build_user_turn(message, &context)));

        match self.provider.complete(messages, &self.sampling).await {
            Ok(answer) => {
                self.store
                    .append_exchange(
                        &conversation_id,
                        Message::user(message),
                        Message::assistant(answer.clone()),
                    )
                    .await;
                Reply {
                    response: answer,
                    conversation_id,
                    model: self.provider.model().to_string(),
                    error: None,
                }
            }
            Err(e) => {
                // No history write on a failed answer.
                warn!("completion failed: {e}");
                Reply {
                    response: FALLBACK_ANSWER.to_string(),
                    conversation_id,
                    model: self.provider.model().to_string(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    pub async fn clear_conversation(&self, conversation_id: &str) {
        self.store.delete(conversation_id).await;
    }

    pub async fn conversation_count(&self) -> usize {
        self.store.conversation_count().await
    }
}

/// The final user turn: the message verbatim, or the message preceded by
/// retrieved excerpts and an instruction to answer from them.
fn build_user_turn(message: &str, context: &[String]) -> String {
    if context.is_empty() {
        return message.to_string();
    }

    let excerpts = context
        .iter()
        .map(|doc| format!("Document excerpt:\n{doc}"))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Based on the following document excerpts, please answer the question.\n\n\
         Document Context:\n{excerpts}\n\n\
         Question: {message}\n\n\
         Please provide a clear, accurate answer based on the document content. \
         If the answer isn't in the documents, let me know."
    )
}
