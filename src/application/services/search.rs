use std::sync::Arc;
use tracing::instrument;

use crate::domain::{
    ports::{EmbeddingService, VectorIndex},
    DomainError, RetrievedReview, ReviewRecord,
};

pub const DEFAULT_TOP_K: usize = 3;

/// Owns the embedding function and the similarity index.
///
/// Ingestion and retrieval both go through here so that query vectors and
/// document vectors always come from the same embedding model.
pub struct ReviewSearchService {
    embedding: Arc<dyn EmbeddingService>,
    index: Arc<dyn VectorIndex>,
    default_top_k: usize,
}

impl ReviewSearchService {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        index: Arc<dyn VectorIndex>,
        default_top_k: usize,
    ) -> Self {
        Self {
            embedding,
            index,
            default_top_k,
        }
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<RetrievedReview>, DomainError> {
        self.search_top_k(query, self.default_top_k).await
    }

    #[instrument(skip(self))]
    pub async fn search_top_k(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedReview>, DomainError> {
        let embedding = self.embedding.embed(query).await?;
        self.index.search(&embedding, top_k).await
    }

    /// Embeds and upserts every record. Makes no dedup guarantee of its
    /// own; re-ingesting the same source produces new points.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn ingest(&self, records: &[ReviewRecord]) -> Result<usize, DomainError> {
        if records.is_empty() {
            return Ok(0);
        }

        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;

        for (record, embedding) in records.iter().zip(embeddings.iter()) {
            self.index.upsert(record, embedding).await?;
        }

        Ok(records.len())
    }
}
