pub mod chat;
pub mod health;

use axum::extract::State;
use axum::http::{header, HeaderName};
use axum::{middleware, routing::get, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::api::middleware::logging;
use crate::api::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(chat::index))
        .route("/get", post(chat::get_response))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health::health_check))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            logging::track_request,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn metrics_handler(
    State(state): State<AppState>,
) -> ([(HeaderName, &'static str); 1], String) {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
