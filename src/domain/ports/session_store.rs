use crate::domain::{errors::DomainError, Transcript};
use async_trait::async_trait;

/// Conversation history keyed by session identifier.
///
/// `get` is get-or-create: an unseen session id yields an empty
/// transcript, never an error.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Result<Transcript, DomainError>;
    async fn append(
        &self,
        session_id: &str,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<(), DomainError>;
}
