use crate::domain::DomainError;

/// Embedding model served by the Hugging Face Inference API.
pub const EMBEDDING_MODEL: &str = "BAAI/bge-base-en-v1.5";
pub const EMBEDDING_DIMENSION: usize = 768;

/// Chat model used for both query rewriting and answer generation.
pub const CHAT_MODEL: &str = "llama-3.1-8b-instant";

const DEFAULT_COLLECTION: &str = "product_reviews";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Environment-derived settings, validated once at startup.
///
/// `GROQ_API_KEY` is read here only to fail fast before serving traffic;
/// the rig client picks it up from the environment at call time.
#[derive(Debug, Clone)]
pub struct Settings {
    pub qdrant_url: String,
    pub qdrant_api_key: String,
    pub qdrant_collection: String,
    pub groq_api_key: String,
    pub hf_token: String,
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary lookup function. Every missing
    /// required variable is collected so one error names them all.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let mut missing = Vec::new();
        let mut require = |key: &str| match lookup(key) {
            Some(value) if !value.is_empty() => value,
            _ => {
                missing.push(key.to_string());
                String::new()
            }
        };

        let qdrant_url = require("QDRANT_URL");
        let qdrant_api_key = require("QDRANT_API_KEY");
        let groq_api_key = require("GROQ_API_KEY");
        let hf_token = require("HF_TOKEN");

        if !missing.is_empty() {
            return Err(DomainError::configuration(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let qdrant_collection =
            lookup("QDRANT_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        let host = lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.parse().map_err(|_| {
                DomainError::configuration(format!("SERVER_PORT is not a valid port: {raw}"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            qdrant_url,
            qdrant_api_key,
            qdrant_collection,
            groq_api_key,
            hf_token,
            host,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| map.get(key).map(|v| v.to_string())
    }

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("QDRANT_URL", "http://localhost:6334"),
            ("QDRANT_API_KEY", "qdrant-key"),
            ("GROQ_API_KEY", "groq-key"),
            ("HF_TOKEN", "hf-token"),
        ])
    }

    #[test]
    fn test_all_required_present() {
        let env = full_env();
        let settings = Settings::from_lookup(lookup_from(&env)).unwrap();

        assert_eq!(settings.qdrant_url, "http://localhost:6334");
        assert_eq!(settings.qdrant_collection, DEFAULT_COLLECTION);
        assert_eq!(settings.port, DEFAULT_PORT);
    }

    #[test]
    fn test_reports_every_missing_variable() {
        let mut env = full_env();
        env.remove("GROQ_API_KEY");
        env.remove("HF_TOKEN");

        let err = Settings::from_lookup(lookup_from(&env)).unwrap_err();
        let message = err.to_string();

        assert!(message.contains("GROQ_API_KEY"), "got: {message}");
        assert!(message.contains("HF_TOKEN"), "got: {message}");
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut env = full_env();
        env.insert("HF_TOKEN", "");

        let err = Settings::from_lookup(lookup_from(&env)).unwrap_err();
        assert!(err.to_string().contains("HF_TOKEN"));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut env = full_env();
        env.insert("SERVER_PORT", "not-a-port");

        let err = Settings::from_lookup(lookup_from(&env)).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }
}
