//! sift-api - HTTP API server for sift assessment recommendations.

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use anyhow::Context;
use governor::{Quota, RateLimiter};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sift_api::{build_router, AppState};
use sift_core::{defaults, EmbeddingBackend};
use sift_engine::{load_catalog, CatalogIndex, Recommender};
use sift_inference::OllamaBackend;

/// Build the governor quota from the configured limits. Zero or out-of-range
/// values are a startup error, not a panic.
fn rate_limit_quota(requests: u64, period_secs: u64) -> anyhow::Result<Quota> {
    let quota = Quota::with_period(std::time::Duration::from_secs(period_secs))
        .context("RATE_LIMIT_PERIOD_SECS must be non-zero")?;
    let burst = u32::try_from(requests)
        .ok()
        .and_then(NonZeroU32::new)
        .with_context(|| {
            format!(
                "RATE_LIMIT_REQUESTS must be between 1 and {}, got {}",
                u32::MAX,
                requests
            )
        })?;
    Ok(quota.allow_burst(burst))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "sift_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sift_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("sift-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(non_blocking);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            } else {
                layer = layer.with_ansi(false); // no ANSI in files
            }
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let catalog_path =
        std::env::var("CATALOG_PATH").unwrap_or_else(|_| defaults::CATALOG_PATH.to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| defaults::SERVER_PORT.to_string())
        .parse()
        .unwrap_or(defaults::SERVER_PORT);

    // Rate limiting configuration
    // RATE_LIMIT_REQUESTS: requests per period (default: 100)
    // RATE_LIMIT_PERIOD_SECS: period in seconds (default: 60 = 1 minute)
    let rate_limit_requests: u64 = std::env::var("RATE_LIMIT_REQUESTS")
        .unwrap_or_else(|_| defaults::RATE_LIMIT_REQUESTS.to_string())
        .parse()
        .unwrap_or(defaults::RATE_LIMIT_REQUESTS);
    let rate_limit_period_secs: u64 = std::env::var("RATE_LIMIT_PERIOD_SECS")
        .unwrap_or_else(|_| defaults::RATE_LIMIT_PERIOD_SECS.to_string())
        .parse()
        .unwrap_or(defaults::RATE_LIMIT_PERIOD_SECS);
    let rate_limit_enabled: bool = std::env::var("RATE_LIMIT_ENABLED")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(true);

    info!(
        "Rate limiting: {} ({} requests per {} seconds)",
        if rate_limit_enabled {
            "enabled"
        } else {
            "disabled"
        },
        rate_limit_requests,
        rate_limit_period_secs
    );

    // Initialize the embedding backend
    let backend = Arc::new(OllamaBackend::from_env());
    info!(
        "Inference backend initialized: {}",
        EmbeddingBackend::model_name(backend.as_ref())
    );

    // Load the catalog and build the index. Startup fails on an empty or
    // corrupt catalog rather than binding a listener that serves nothing.
    info!("Loading catalog from {}", catalog_path);
    let assessments = load_catalog(std::path::Path::new(&catalog_path), backend.as_ref())
        .await
        .with_context(|| format!("failed to load catalog from {}", catalog_path))?;
    let index = Arc::new(
        CatalogIndex::build(assessments).context("failed to build catalog index")?,
    );
    info!(
        catalog_size = index.len(),
        dimension = index.dimension(),
        "Catalog index ready"
    );

    let retrieval_top_k = std::env::var("RETRIEVAL_TOP_K")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(defaults::RETRIEVAL_TOP_K);

    let recommender = Arc::new(
        Recommender::new(index, backend).with_retrieval_top_k(retrieval_top_k),
    );

    // Create rate limiter if enabled
    let rate_limiter = if rate_limit_enabled {
        let quota = rate_limit_quota(rate_limit_requests, rate_limit_period_secs)?;
        Some(Arc::new(RateLimiter::direct(quota)))
    } else {
        None
    };

    let state = AppState {
        recommender,
        rate_limiter,
    };

    let app = build_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
