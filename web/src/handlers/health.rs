//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use axum::{Json, extract::State, http::StatusCode};
use review_analyzer_runtime::{HealthCheck, ReviewStore};
use std::sync::Arc;

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the service is running.
/// This endpoint does NOT look at the store.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Health check with store diagnostics (for readiness).
///
/// Always 200 OK: an empty store reports `Degraded` but still serves.
///
/// # Endpoint
///
/// ```text
/// GET /health/ready
/// ```
///
/// # Response
///
/// ```json
/// {
///   "component": "review_store",
///   "status": "Healthy",
///   "message": null,
///   "metadata": { "review_count": "1000" }
/// }
/// ```
pub async fn health_check_with_store(
    State(store): State<Arc<ReviewStore>>,
) -> (StatusCode, Json<HealthCheck>) {
    (StatusCode::OK, Json(store.health().await))
}
