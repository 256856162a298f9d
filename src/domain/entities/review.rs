use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One product review, ready for embedding and indexing.
///
/// Immutable once created; its lifecycle ends at ingestion into the
/// vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: Uuid,
    pub text: String,
    pub metadata: serde_json::Value,
}

impl ReviewRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            metadata: serde_json::json!({}),
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Product name from metadata, when the source carried one.
    pub fn product_name(&self) -> Option<&str> {
        self.metadata.get("product_name").and_then(|v| v.as_str())
    }
}

/// A review returned from similarity search, with its score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedReview {
    pub record: ReviewRecord,
    pub score: f32,
}
