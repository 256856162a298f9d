use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::{ports::VectorIndex, DomainError, Embedding, RetrievedReview, ReviewRecord};

/// Cosine-ranked index held in memory. Used by tests and as an offline
/// stand-in for the remote index.
pub struct InMemoryReviewIndex {
    records: RwLock<Vec<(ReviewRecord, Embedding)>>,
}

impl InMemoryReviewIndex {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryReviewIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndex for InMemoryReviewIndex {
    async fn upsert(
        &self,
        record: &ReviewRecord,
        embedding: &Embedding,
    ) -> Result<(), DomainError> {
        let mut store = self
            .records
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        store.retain(|(r, _)| r.id != record.id);
        store.push((record.clone(), embedding.clone()));
        Ok(())
    }

    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievedReview>, DomainError> {
        let store = self
            .records
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut results: Vec<RetrievedReview> = store
            .iter()
            .map(|(record, embedding)| RetrievedReview {
                record: record.clone(),
                score: query.cosine_similarity(embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(results.into_iter().take(top_k).collect())
    }
}
