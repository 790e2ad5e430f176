//! Centralized default constants for the sift service.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates should reference these constants instead of defining
//! their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// EMBEDDING
// =============================================================================

/// Default Ollama endpoint.
pub const OLLAMA_URL: &str = "http://localhost:11434";

/// Default embedding model name (Ollama). all-minilm matches the
/// MiniLM-family model the catalog vectors were produced with.
pub const EMBED_MODEL: &str = "all-minilm";

/// Default embedding vector dimension for all-minilm.
pub const EMBED_DIMENSION: usize = 384;

/// Timeout for embedding requests (seconds).
pub const EMBED_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// RETRIEVAL & RANKING
// =============================================================================

/// Number of candidates retrieved from the index before scoring. Larger than
/// any result size so that hard filters and balancing have enough slack.
pub const RETRIEVAL_TOP_K: usize = 50;

/// Smallest number of results a request may ask for.
pub const MAX_RESULTS_FLOOR: usize = 1;

/// Largest number of results a request may ask for.
pub const MAX_RESULTS_CEIL: usize = 10;

/// Default result count when the request does not specify one.
pub const MAX_RESULTS_DEFAULT: usize = 10;

/// Per-matched-skill multiplicative boost increment.
pub const SKILL_BOOST: f32 = 0.2;

/// Multiplicative boost for a candidate whose category matches a query hint.
pub const CATEGORY_BOOST: f32 = 1.3;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 8000;

/// Default request body size limit in bytes (job descriptions are text).
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Default rate limit: max requests per period.
pub const RATE_LIMIT_REQUESTS: u64 = 100;

/// Default rate limit: period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

// =============================================================================
// CATALOG
// =============================================================================

/// Default catalog file path.
pub const CATALOG_PATH: &str = "assessments.json";

/// Tolerance when checking that a stored vector is unit-norm.
pub const UNIT_NORM_EPSILON: f32 = 1e-3;
