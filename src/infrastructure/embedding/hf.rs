use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};

const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a [&'a str],
}

/// Embeddings via the Hugging Face Inference API feature-extraction
/// pipeline. One HTTP call per batch; no retries.
pub struct HfEmbedding {
    client: Client,
    token: String,
    model: String,
    dimension: usize,
    base_url: String,
}

impl HfEmbedding {
    pub fn new(token: impl Into<String>, model: impl Into<String>, dimension: usize) -> Self {
        Self::with_base_url(token, model, dimension, DEFAULT_BASE_URL)
    }

    /// Custom base URL, used to point tests at a mock server.
    pub fn with_base_url(
        token: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
        base_url: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            token: token.into(),
            model: model.into(),
            dimension,
            base_url: base_url.into(),
        }
    }

    async fn request(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        let url = format!(
            "{}/{}/pipeline/feature-extraction",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&FeatureExtractionRequest { inputs: texts })
            .send()
            .await
            .map_err(|e| DomainError::backend(format!("embedding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(code = status.as_u16(), body = %body, "embedding API error");
            return Err(DomainError::backend(format!(
                "embedding API returned {status}: {body}"
            )));
        }

        let vectors: Vec<Vec<f32>> = response
            .json()
            .await
            .map_err(|e| DomainError::backend(format!("invalid embedding response: {e}")))?;

        if vectors.len() != texts.len() {
            return Err(DomainError::backend(format!(
                "embedding API returned {} vectors for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }

        for vector in &vectors {
            if vector.len() != self.dimension {
                return Err(DomainError::backend(format!(
                    "expected {}-dimensional embeddings, got {}",
                    self.dimension,
                    vector.len()
                )));
            }
        }

        Ok(vectors.into_iter().map(Embedding::new).collect())
    }
}

#[async_trait]
impl EmbeddingService for HfEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        self.request(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::backend("embedding API returned no vector"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer, dimension: usize) -> HfEmbedding {
        HfEmbedding::with_base_url("test-token", "test/model", dimension, server.uri())
    }

    fn vector(dimension: usize, fill: f32) -> Vec<f32> {
        vec![fill; dimension]
    }

    #[tokio::test]
    async fn test_embed_posts_inputs_and_parses_vector() {
        let server = MockServer::start().await;
        let client = test_client(&server, 4);

        Mock::given(method("POST"))
            .and(path("/test/model/pipeline/feature-extraction"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(serde_json::json!({ "inputs": ["hello"] })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([vector(4, 0.5)])),
            )
            .mount(&server)
            .await;

        let embedding = client.embed("hello").await.unwrap();
        assert_eq!(embedding.dimension(), 4);
    }

    #[tokio::test]
    async fn test_embed_batch_preserves_order() {
        let server = MockServer::start().await;
        let client = test_client(&server, 2);

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                vector(2, 0.1),
                vector(2, 0.2)
            ])))
            .mount(&server)
            .await;

        let embeddings = client.embed_batch(&["a", "b"]).await.unwrap();
        assert_eq!(embeddings.len(), 2);
        assert!((embeddings[0].as_slice()[0] - 0.1).abs() < 1e-6);
        assert!((embeddings[1].as_slice()[0] - 0.2).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_auth_failure_is_backend_error() {
        let server = MockServer::start().await;
        let client = test_client(&server, 4);

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
            .mount(&server)
            .await;

        let err = client.embed("hello").await.unwrap_err();
        assert!(matches!(err, DomainError::BackendUnavailable(_)));
    }

    #[tokio::test]
    async fn test_wrong_dimension_rejected() {
        let server = MockServer::start().await;
        let client = test_client(&server, 768);

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([[0.1, 0.2, 0.3]])),
            )
            .mount(&server)
            .await;

        let err = client.embed("hello").await.unwrap_err();
        assert!(err.to_string().contains("768"));
    }

    #[tokio::test]
    async fn test_embed_batch_empty_makes_no_request() {
        let server = MockServer::start().await;
        let client = test_client(&server, 4);

        let embeddings = client.embed_batch(&[]).await.unwrap();
        assert!(embeddings.is_empty());
    }
}
