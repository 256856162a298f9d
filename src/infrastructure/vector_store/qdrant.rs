use async_trait::async_trait;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use uuid::Uuid;

use crate::domain::{ports::VectorIndex, DomainError, Embedding, RetrievedReview, ReviewRecord};

/// Remote review index backed by Qdrant. The collection is created with
/// cosine distance on first use.
pub struct QdrantReviewIndex {
    client: Qdrant,
    collection: String,
    dimension: usize,
}

impl QdrantReviewIndex {
    pub async fn new(
        url: &str,
        api_key: &str,
        collection: &str,
        dimension: usize,
    ) -> Result<Self, DomainError> {
        let client = Qdrant::from_url(url)
            .api_key(api_key.to_string())
            .build()
            .map_err(|e| DomainError::backend(e.to_string()))?;

        let index = Self {
            client,
            collection: collection.to_string(),
            dimension,
        };

        index.ensure_collection().await?;

        Ok(index)
    }

    async fn ensure_collection(&self) -> Result<(), DomainError> {
        let collections = self
            .client
            .list_collections()
            .await
            .map_err(|e| DomainError::backend(e.to_string()))?;

        let exists = collections
            .collections
            .iter()
            .any(|c| c.name == self.collection);

        if !exists {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection).vectors_config(
                        VectorParamsBuilder::new(self.dimension as u64, Distance::Cosine),
                    ),
                )
                .await
                .map_err(|e| DomainError::backend(e.to_string()))?;
        }

        Ok(())
    }
}

#[async_trait]
impl VectorIndex for QdrantReviewIndex {
    async fn upsert(
        &self,
        record: &ReviewRecord,
        embedding: &Embedding,
    ) -> Result<(), DomainError> {
        // Metadata is stored as a JSON string so reads only need string
        // payload access.
        let metadata = serde_json::to_string(&record.metadata)
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let payload: Payload = serde_json::json!({
            "record_id": record.id.to_string(),
            "text": record.text,
            "metadata": metadata,
        })
        .try_into()
        .map_err(|_| DomainError::internal("Failed to create payload"))?;

        let point = PointStruct::new(
            record.id.to_string(),
            embedding.as_slice().to_vec(),
            payload,
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]))
            .await
            .map_err(|e| DomainError::backend(e.to_string()))?;

        Ok(())
    }

    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievedReview>, DomainError> {
        let results = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, query.as_slice().to_vec(), top_k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| DomainError::backend(e.to_string()))?;

        let retrieved: Vec<RetrievedReview> = results
            .result
            .into_iter()
            .filter_map(|point| {
                let payload = point.payload;

                let id: Uuid = payload.get("record_id")?.as_str()?.parse().ok()?;
                let text = payload.get("text")?.as_str()?.to_string();
                let metadata = payload
                    .get("metadata")
                    .and_then(|m| m.as_str())
                    .and_then(|m| serde_json::from_str(m).ok())
                    .unwrap_or_else(|| serde_json::json!({}));

                Some(RetrievedReview {
                    record: ReviewRecord { id, text, metadata },
                    score: point.score,
                })
            })
            .collect();

        Ok(retrieved)
    }
}
