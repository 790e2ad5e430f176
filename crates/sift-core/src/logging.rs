//! Structured logging schema and field name constants for sift.
//!
//! All crates use these constants for consistent structured logging fields.
//! This ensures log aggregation tools (Loki, Elasticsearch) can query by
//! standardized field names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data (candidates, matches) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across a request.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "engine", "inference"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "index", "interpreter", "scorer", "balancer", "ollama"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "recommend", "search", "parse", "embed_texts"
pub const OPERATION: &str = "op";

// ─── Request fields ────────────────────────────────────────────────────────

/// Raw query text (truncated at the call site for long job descriptions).
pub const QUERY: &str = "query";

/// Requested result count after clamping.
pub const MAX_RESULTS: &str = "max_results";

/// Effective time limit in minutes, if any.
pub const TIME_LIMIT: &str = "time_limit";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of candidates retrieved from the index before scoring.
pub const CANDIDATE_COUNT: &str = "candidate_count";

/// Number of results returned to the caller.
pub const RESULT_COUNT: &str = "result_count";

/// Number of input texts sent to an embedding model.
pub const INPUT_COUNT: &str = "input_count";

// ─── Ranking fields ────────────────────────────────────────────────────────

/// Number of required skills extracted from the query.
pub const SKILL_COUNT: &str = "skill_count";

/// Category hints extracted from the query.
pub const CATEGORY_HINTS: &str = "category_hints";

/// True when the time filter was relaxed because it excluded every candidate.
pub const FILTER_RELAXED: &str = "filter_relaxed";

// ─── Catalog fields ────────────────────────────────────────────────────────

/// Number of entries in the catalog index.
pub const CATALOG_SIZE: &str = "catalog_size";

/// Embedding vector dimension.
pub const DIMENSION: &str = "dimension";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for embedding.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
