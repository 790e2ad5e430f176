//! Trait definitions shared across sift crates.

use async_trait::async_trait;

use crate::{Result, Vector};

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Backend for generating text embeddings.
///
/// The recommendation core treats the provider as a black box: deterministic
/// for identical input, one fixed output dimension. Failures surface as
/// [`crate::Error::Embedding`] and are propagated, not retried internally;
/// retry policy belongs to the caller.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Generate embeddings for the given texts.
    ///
    /// Returns a vector of embedding vectors, one per input text.
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>>;

    /// Get the expected dimension of embedding vectors.
    fn dimension(&self) -> usize;

    /// Get the model name being used.
    fn model_name(&self) -> &str;

    /// Check if the backend is available and responding.
    async fn health_check(&self) -> Result<bool>;
}
