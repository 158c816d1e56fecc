pub mod gateway;
pub mod http;
pub mod index;

pub use gateway::{GatewayError, RetrievalGateway};
pub use http::HttpSemanticIndex;
pub use index::{IndexError, IndexItem, SemanticIndex};
