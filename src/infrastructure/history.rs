use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{ports::SessionStore, DomainError, MessageRole, Transcript};

/// Process-lifetime session history. Transcripts are never pruned or
/// persisted; the map lives until the process exits.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Transcript>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Transcript, DomainError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(sessions.entry(session_id.to_string()).or_default().clone())
    }

    async fn append(
        &self,
        session_id: &str,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<(), DomainError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let transcript = sessions.entry(session_id.to_string()).or_default();
        transcript.push_message(MessageRole::User, user_text);
        transcript.push_message(MessageRole::Assistant, assistant_text);
        Ok(())
    }
}
