//! Ollama embedding backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use sift_core::{EmbeddingBackend, Error, Result, Vector};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = sift_core::defaults::OLLAMA_URL;

/// Default embedding model.
pub const DEFAULT_EMBED_MODEL: &str = sift_core::defaults::EMBED_MODEL;

/// Default embedding dimension for all-minilm.
pub const DEFAULT_DIMENSION: usize = sift_core::defaults::EMBED_DIMENSION;

/// Timeout for embedding requests (seconds).
pub const EMBED_TIMEOUT_SECS: u64 = sift_core::defaults::EMBED_TIMEOUT_SECS;

/// Ollama embedding backend.
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    embed_model: String,
    dimension: usize,
    embed_timeout_secs: u64,
}

impl OllamaBackend {
    /// Create a new Ollama backend with default settings.
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_OLLAMA_URL.to_string(),
            DEFAULT_EMBED_MODEL.to_string(),
            DEFAULT_DIMENSION,
        )
    }

    /// Create a new Ollama backend with custom configuration.
    pub fn with_config(base_url: String, embed_model: String, dimension: usize) -> Self {
        let embed_timeout = std::env::var("SIFT_EMBED_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(EMBED_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(embed_timeout))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            "Initializing Ollama backend: url={}, embed={}, dim={}",
            base_url, embed_model, dimension
        );

        Self {
            client,
            base_url,
            embed_model,
            dimension,
            embed_timeout_secs: embed_timeout,
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("OLLAMA_BASE").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        let embed_model =
            std::env::var("OLLAMA_EMBED_MODEL").unwrap_or_else(|_| DEFAULT_EMBED_MODEL.to_string());
        let dimension = std::env::var("OLLAMA_EMBED_DIM")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_DIMENSION);

        Self::with_config(base_url, embed_model, dimension)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for OllamaBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embeddings: Vec<Vector>,
}

#[async_trait]
impl EmbeddingBackend for OllamaBackend {
    #[instrument(skip(self, texts), fields(subsystem = "inference", component = "ollama", op = "embed_texts", model = %self.embed_model, input_count = texts.len()))]
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let start = Instant::now();

        let request = EmbeddingRequest {
            model: self.embed_model.clone(),
            input: texts.to_vec(),
        };

        let response = self
            .client
            .post(format!("{}/api/embed", self.base_url))
            .timeout(Duration::from_secs(self.embed_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Invalid response: {}", e)))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(Error::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                parsed.embeddings.len()
            )));
        }
        for (i, embedding) in parsed.embeddings.iter().enumerate() {
            if embedding.len() != self.dimension {
                return Err(Error::Embedding(format!(
                    "Embedding {} has dimension {}, expected {}",
                    i,
                    embedding.len(),
                    self.dimension
                )));
            }
        }

        debug!(
            input_count = texts.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Embeddings generated"
        );

        Ok(parsed.embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.embed_model
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Health check failed: {}", e)))?;
        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer, dimension: usize) -> OllamaBackend {
        OllamaBackend::with_config(server.uri(), "all-minilm".to_string(), dimension)
    }

    #[tokio::test]
    async fn test_embed_texts_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embed"))
            .and(body_partial_json(serde_json::json!({
                "model": "all-minilm",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embeddings": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
            })))
            .mount(&server)
            .await;

        let backend = backend_for(&server, 3);
        let out = backend
            .embed_texts(&["java".to_string(), "sales".to_string()])
            .await
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], vec![1.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_embed_texts_empty_input_skips_request() {
        let server = MockServer::start().await;
        let backend = backend_for(&server, 3);
        let out = backend.embed_texts(&[]).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_embed_texts_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embed"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
            .mount(&server)
            .await;

        let backend = backend_for(&server, 3);
        let err = backend
            .embed_texts(&["java".to_string()])
            .await
            .unwrap_err();
        match err {
            Error::Embedding(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("model not loaded"));
            }
            other => panic!("Expected Embedding error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_embed_texts_count_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embeddings": [[1.0, 0.0, 0.0]]
            })))
            .mount(&server)
            .await;

        let backend = backend_for(&server, 3);
        let err = backend
            .embed_texts(&["a".to_string(), "b".to_string()])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Expected 2 embeddings"));
    }

    #[tokio::test]
    async fn test_embed_texts_dimension_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embeddings": [[1.0, 0.0]]
            })))
            .mount(&server)
            .await;

        let backend = backend_for(&server, 3);
        let err = backend.embed_texts(&["a".to_string()]).await.unwrap_err();
        assert!(err.to_string().contains("dimension 2, expected 3"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": []
            })))
            .mount(&server)
            .await;

        let backend = backend_for(&server, 3);
        assert!(backend.health_check().await.unwrap());
    }

    #[test]
    fn test_with_config_accessors() {
        let backend = OllamaBackend::with_config(
            "http://embed-host:11434".to_string(),
            "nomic-embed-text".to_string(),
            768,
        );
        assert_eq!(backend.base_url(), "http://embed-host:11434");
        assert_eq!(backend.model_name(), "nomic-embed-text");
        assert_eq!(backend.dimension(), 768);
    }
}
