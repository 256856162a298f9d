//! Offline ingestion: reads the review CSV and populates the vector
//! index. Run once before serving; the serving path never ingests.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecom_assist::application::{ReviewSearchService, DEFAULT_TOP_K};
use ecom_assist::infrastructure::{
    HfEmbedding, QdrantReviewIndex, ReviewConverter, Settings, EMBEDDING_DIMENSION,
    EMBEDDING_MODEL,
};

const REVIEWS_CSV: &str = "data/product_reviews.csv";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecom_assist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;

    let records = ReviewConverter::new(REVIEWS_CSV).convert()?;
    info!(count = records.len(), source = REVIEWS_CSV, "converted review records");

    let embedding = Arc::new(HfEmbedding::new(
        &settings.hf_token,
        EMBEDDING_MODEL,
        EMBEDDING_DIMENSION,
    ));
    let index = Arc::new(
        QdrantReviewIndex::new(
            &settings.qdrant_url,
            &settings.qdrant_api_key,
            &settings.qdrant_collection,
            EMBEDDING_DIMENSION,
        )
        .await?,
    );

    let search = ReviewSearchService::new(embedding, index, DEFAULT_TOP_K);
    let ingested = search.ingest(&records).await?;

    info!(
        ingested,
        collection = %settings.qdrant_collection,
        "ingestion complete"
    );

    Ok(())
}
