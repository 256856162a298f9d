use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::groq;

use crate::domain::{ports::ChatModel, DomainError};

/// Chat completions via Groq. The client reads `GROQ_API_KEY` from the
/// environment; startup validation guarantees it is present.
pub struct GroqChat {
    model: String,
}

impl GroqChat {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

#[async_trait]
impl ChatModel for GroqChat {
    async fn complete_with_system(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<String, DomainError> {
        let client = groq::Client::from_env();
        let agent = client.agent(&self.model).preamble(system).build();
        agent
            .prompt(prompt)
            .await
            .map_err(|e| DomainError::backend(format!("chat model request failed: {e}")))
    }
}
