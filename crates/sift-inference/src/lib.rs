//! # sift-inference
//!
//! Embedding backend implementations for sift.
//!
//! This crate provides:
//! - Ollama embedding backend (default)
//! - Deterministic mock backend (feature `mock`)
//!
//! # Example
//!
//! ```rust,no_run
//! use sift_inference::OllamaBackend;
//! use sift_core::EmbeddingBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OllamaBackend::from_env();
//!     let texts = vec!["Java developer".to_string()];
//!     let embeddings = backend.embed_texts(&texts).await.unwrap();
//! }
//! ```

pub mod ollama;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use sift_core::*;

pub use ollama::OllamaBackend;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbeddingBackend;
