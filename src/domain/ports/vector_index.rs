use crate::domain::{errors::DomainError, Embedding, RetrievedReview, ReviewRecord};
use async_trait::async_trait;

#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn upsert(&self, record: &ReviewRecord, embedding: &Embedding)
        -> Result<(), DomainError>;
    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievedReview>, DomainError>;
}
