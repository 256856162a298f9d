pub mod chat;
pub mod config;
pub mod converter;
pub mod embedding;
pub mod history;
pub mod vector_store;

pub use chat::GroqChat;
pub use config::{Settings, CHAT_MODEL, EMBEDDING_DIMENSION, EMBEDDING_MODEL};
pub use converter::ReviewConverter;
pub use embedding::HfEmbedding;
pub use history::InMemorySessionStore;
pub use vector_store::{InMemoryReviewIndex, QdrantReviewIndex};
