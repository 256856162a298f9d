mod pipeline;
mod search;

pub use pipeline::{AnswerGenerator, ConversationalPipeline, QueryRewriter, DEFAULT_SESSION_ID};
pub use search::{ReviewSearchService, DEFAULT_TOP_K};
