pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use metrics::Metrics;
pub use routes::create_router;
pub use state::AppState;
