use std::sync::Arc;

use crate::api::metrics::Metrics;
use crate::application::ConversationalPipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ConversationalPipeline>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(pipeline: Arc<ConversationalPipeline>) -> Self {
        Self {
            pipeline,
            metrics: Arc::new(Metrics::new()),
        }
    }
}
