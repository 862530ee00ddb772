//! HTTP adapters - REST API implementations.
//!
//! [`app_router`] assembles the feature routers and the tower-http layers
//! for tracing, CORS and request timeouts.

pub mod analysis;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

// Re-export key types for convenience
pub use analysis::analysis_router;
pub use analysis::AnalysisAppState;

/// Inline CSV uploads make request bodies larger than axum's default.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Builds the complete application router.
pub fn app_router(state: AnalysisAppState, server: &ServerConfig) -> Router {
    analysis_router()
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// Configured origins only; any origin when none are configured outside
/// production.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() && !server.is_production() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
