//! Mock embedding backend for deterministic testing.
//!
//! Generates hash-seeded unit vectors so identical inputs always produce
//! identical embeddings, with optional fixed vectors per text and failure
//! injection for upstream-error paths.

use std::collections::HashMap;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sift_core::{EmbeddingBackend, Error, Result, Vector};

/// Mock embedding backend.
#[derive(Debug, Clone, Default)]
pub struct MockEmbeddingBackend {
    dimension: usize,
    fixed_vectors: HashMap<String, Vector>,
    failure: Option<String>,
}

impl MockEmbeddingBackend {
    /// Create a new mock with the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            fixed_vectors: HashMap::new(),
            failure: None,
        }
    }

    /// Register a fixed vector for an exact input text. Texts without a
    /// fixed vector get a deterministic hash-seeded one.
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vector) -> Self {
        self.fixed_vectors.insert(text.into(), vector);
        self
    }

    /// Make every `embed_texts` call fail with the given message.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    fn deterministic_vector(&self, text: &str) -> Vector {
        // FNV-1a over the text seeds the RNG.
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in text.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        let mut rng = StdRng::seed_from_u64(hash);
        let mut v: Vector = (0..self.dimension)
            .map(|_| rng.gen::<f32>() - 0.5)
            .collect();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

#[async_trait]
impl EmbeddingBackend for MockEmbeddingBackend {
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>> {
        if let Some(msg) = &self.failure {
            return Err(Error::Embedding(msg.clone()));
        }
        Ok(texts
            .iter()
            .map(|t| {
                self.fixed_vectors
                    .get(t)
                    .cloned()
                    .unwrap_or_else(|| self.deterministic_vector(t))
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "mock-embed"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.failure.is_none())
    }
}
