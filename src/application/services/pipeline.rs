use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::instrument;

use crate::application::services::search::ReviewSearchService;
use crate::domain::{
    ports::{ChatModel, SessionStore},
    DomainError, RetrievedReview, Transcript,
};

pub const DEFAULT_SESSION_ID: &str = "user-session";

const REWRITE_SYSTEM_PROMPT: &str = "Given the chat history and the latest customer message, \
rewrite the message as a natural, standalone question suitable for searching a database of \
product reviews. Resolve pronouns and references against the history. Focus on product names, \
brands, features, price ranges and customer experiences mentioned so far. Reply with the \
rewritten question only.";

const ANSWER_SYSTEM_PROMPT: &str = "You are a friendly, knowledgeable assistant for an \
e-commerce store. You help customers choose products by sharing insights from customer \
reviews. Ground your answer in the review context below whenever it is relevant. When the \
context does not cover the question, say so honestly and give only general advice; never \
invent specifics about products or reviews you have not seen.";

/// Stage 1: rewrite the raw input into a standalone search query using the
/// session history.
///
/// A pronoun-laden follow-up ("what about in red?") is useless as a search
/// query on its own; rewriting against history recovers the missing
/// referent. The stage runs even on empty history, where the model is
/// expected to hand the input back unchanged.
pub struct QueryRewriter {
    chat: Arc<dyn ChatModel>,
}

impl QueryRewriter {
    pub fn new(chat: Arc<dyn ChatModel>) -> Self {
        Self { chat }
    }

    #[instrument(skip(self, transcript))]
    pub async fn rewrite(
        &self,
        input: &str,
        transcript: &Transcript,
    ) -> Result<String, DomainError> {
        let prompt = if transcript.is_empty() {
            input.to_string()
        } else {
            format!(
                "Conversation so far:\n{}\n\nLatest customer message: {}",
                transcript.render(),
                input
            )
        };

        self.chat
            .complete_with_system(REWRITE_SYSTEM_PROMPT, &prompt)
            .await
    }
}

/// Stage 2: generate the final answer grounded in the retrieved reviews.
pub struct AnswerGenerator {
    chat: Arc<dyn ChatModel>,
}

impl AnswerGenerator {
    pub fn new(chat: Arc<dyn ChatModel>) -> Self {
        Self { chat }
    }

    #[instrument(skip(self, passages, transcript), fields(count = passages.len()))]
    pub async fn generate(
        &self,
        passages: &[RetrievedReview],
        question: &str,
        transcript: &Transcript,
    ) -> Result<String, DomainError> {
        let system = format!(
            "{}\n\nCONTEXT:\n{}",
            ANSWER_SYSTEM_PROMPT,
            render_context(passages)
        );

        let prompt = if transcript.is_empty() {
            format!("Customer question: {question}")
        } else {
            format!(
                "Conversation so far:\n{}\n\nCustomer question: {}",
                transcript.render(),
                question
            )
        };

        self.chat.complete_with_system(&system, &prompt).await
    }
}

fn render_context(passages: &[RetrievedReview]) -> String {
    if passages.is_empty() {
        return "No matching product reviews were found for this question.".to_string();
    }

    passages
        .iter()
        .enumerate()
        .map(|(i, p)| match p.record.product_name() {
            Some(name) => format!("[{}] Review of {}: {}", i + 1, name, p.record.text),
            None => format!("[{}] {}", i + 1, p.record.text),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The conversational retrieval pipeline: history-aware query rewriting,
/// top-k retrieval, grounded answer generation, history persistence.
///
/// Invocations for the same session id serialize on a per-session lock so
/// the transcript grows in chronological order; distinct sessions run in
/// parallel. History is appended only after a successful generation, so
/// every stored assistant turn is a real model output.
pub struct ConversationalPipeline {
    rewriter: QueryRewriter,
    generator: AnswerGenerator,
    search: Arc<ReviewSearchService>,
    sessions: Arc<dyn SessionStore>,
    top_k: usize,
    session_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ConversationalPipeline {
    pub fn new(
        chat: Arc<dyn ChatModel>,
        search: Arc<ReviewSearchService>,
        sessions: Arc<dyn SessionStore>,
        top_k: usize,
    ) -> Self {
        Self {
            rewriter: QueryRewriter::new(chat.clone()),
            generator: AnswerGenerator::new(chat),
            search,
            sessions,
            top_k,
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    fn session_lock(&self, session_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .session_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Runs the full pipeline for one message. Steps are strictly
    /// sequential and none is retried; any stage failure aborts the
    /// invocation before history is touched.
    #[instrument(skip(self, user_input))]
    pub async fn invoke(&self, user_input: &str, session_id: &str) -> Result<String, DomainError> {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock().await;

        let transcript = self.sessions.get(session_id).await?;

        let rewritten = self.rewriter.rewrite(user_input, &transcript).await?;
        tracing::debug!(query = %rewritten, "rewrote user input for retrieval");

        let passages = self.search.search_top_k(&rewritten, self.top_k).await?;
        tracing::debug!(retrieved = passages.len(), "retrieved review passages");

        let answer = self
            .generator
            .generate(&passages, user_input, &transcript)
            .await?;

        if answer.trim().is_empty() {
            return Err(DomainError::backend("chat model returned an empty answer"));
        }

        self.sessions
            .append(session_id, user_input, &answer)
            .await?;

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReviewRecord;

    #[test]
    fn test_render_context_empty() {
        let context = render_context(&[]);
        assert!(context.contains("No matching product reviews"));
    }

    #[test]
    fn test_render_context_numbers_passages() {
        let passages = vec![
            RetrievedReview {
                record: ReviewRecord::new("Great picture quality")
                    .with_metadata(serde_json::json!({"product_name": "Acme TV 55"})),
                score: 0.9,
            },
            RetrievedReview {
                record: ReviewRecord::new("Sound is tinny"),
                score: 0.7,
            },
        ];

        let context = render_context(&passages);
        assert!(context.contains("[1] Review of Acme TV 55: Great picture quality"));
        assert!(context.contains("[2] Sound is tinny"));
    }
}
