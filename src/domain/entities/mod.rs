mod conversation;
mod embedding;
mod review;

pub use conversation::{Message, MessageRole, Transcript};
pub use embedding::Embedding;
pub use review::{RetrievedReview, ReviewRecord};
