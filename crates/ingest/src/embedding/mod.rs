pub mod fallback;
pub mod remote;
pub mod resilient;
pub mod traits;

pub use fallback::fallback_embedding;
pub use remote::RemoteEmbedder;
pub use resilient::ResilientEmbedder;
pub use traits::{Embedder, EmbeddingError};
