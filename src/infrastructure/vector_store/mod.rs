mod in_memory;
mod qdrant;

pub use in_memory::InMemoryReviewIndex;
pub use qdrant::QdrantReviewIndex;
