use crate::domain::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete_with_system(&self, system: &str, prompt: &str)
        -> Result<String, DomainError>;
}
