pub mod assistant;
pub mod store;

pub use assistant::{Assistant, Reply};
pub use store::{ConversationStore, MemoryConversationStore};
