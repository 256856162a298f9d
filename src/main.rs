use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecom_assist::api::{create_router, AppState};
use ecom_assist::application::{ConversationalPipeline, ReviewSearchService, DEFAULT_TOP_K};
use ecom_assist::infrastructure::{
    GroqChat, HfEmbedding, InMemorySessionStore, QdrantReviewIndex, Settings, CHAT_MODEL,
    EMBEDDING_DIMENSION, EMBEDDING_MODEL,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecom_assist=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    // Fail fast: every missing variable is reported before any client is
    // constructed or the listener binds.
    let settings = Settings::from_env()?;

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
    info!(collection = %settings.qdrant_collection, "connected to vector index");

    let search = Arc::new(ReviewSearchService::new(embedding, index, DEFAULT_TOP_K));
    let chat = Arc::new(GroqChat::new(CHAT_MODEL));
    let sessions = Arc::new(InMemorySessionStore::new());
    let pipeline = Arc::new(ConversationalPipeline::new(
        chat,
        search,
        sessions,
        DEFAULT_TOP_K,
    ));

    let state = AppState::new(pipeline);
    let app = create_router(state);

    let addr = SocketAddr::new(settings.host.parse()?, settings.port);
    info!("chat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
