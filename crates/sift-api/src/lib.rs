//! sift-api - HTTP API surface for the sift recommendation service.
//!
//! The router and handlers live here so integration tests can drive the
//! service in-process; `main.rs` wires configuration, the catalog index,
//! and the listener around [`build_router`].

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use sift_core::{
    defaults, EmbeddingBackend, RecommendRequest, RecommendResponse, RecommendedAssessment,
};
use sift_engine::Recommender;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically, which is
/// useful for log correlation.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Global rate limiter type (direct, in-memory).
pub type GlobalRateLimiter = governor::RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The recommendation pipeline over the immutable catalog index.
    pub recommender: Arc<Recommender>,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the service router with its middleware stack.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/recommend", post(recommend))
        .route("/", get(root_info))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(defaults::BODY_LIMIT_BYTES))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .with_state(state)
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Liveness probe. The catalog index is built before the listener binds, so
/// a reachable service is a healthy one; startup aborts on an empty or
/// corrupt catalog instead of serving degraded rankings.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "catalog_size": state.recommender.index().len(),
        "model": state.recommender.backend().model_name(),
    }))
}

async fn root_info() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "sift assessment recommendation API",
        "endpoints": {
            "health": "/health",
            "recommend": "/recommend (POST)",
        },
    }))
}

async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // Malformed or incomplete bodies are a plain 400, not axum's default 422.
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            return Err(ApiError::TooManyRequests);
        }
    }

    let recommendations = state
        .recommender
        .recommend(&request.query, request.max_results, request.time_limit)
        .await?;

    let assessments: Vec<RecommendedAssessment> = recommendations
        .into_iter()
        .map(|r| RecommendedAssessment {
            id: r.assessment.id,
            name: r.assessment.name,
            url: r.assessment.url,
            category: r.assessment.category,
            duration_minutes: r.assessment.duration_minutes,
            skills: r.assessment.skills,
            relevance_score: round3(r.relevance_score),
        })
        .collect();

    Ok(Json(RecommendResponse {
        status: "success".to_string(),
        query: request.query,
        total_results: assessments.len(),
        recommendations: assessments,
    }))
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    TooManyRequests,
    Upstream(String),
    Internal(String),
}

impl From<sift_core::Error> for ApiError {
    fn from(err: sift_core::Error) -> Self {
        match err {
            sift_core::Error::Embedding(msg) => ApiError::Upstream(msg),
            sift_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded".to_string(),
            ),
            ApiError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                format!("Embedding provider unavailable: {}", msg),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.123456), 0.123);
        assert_eq!(round3(0.9995), 1.0);
        assert_eq!(round3(0.0), 0.0);
    }

    #[test]
    fn test_api_error_from_core_error() {
        let err: ApiError = sift_core::Error::Embedding("down".to_string()).into();
        assert!(matches!(err, ApiError::Upstream(_)));

        let err: ApiError = sift_core::Error::InvalidInput("bad".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err: ApiError = sift_core::Error::EmptyCatalog.into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_api_error_status_codes() {
        let resp = ApiError::Upstream("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::TooManyRequests.into_response();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
