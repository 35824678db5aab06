//! Review service HTTP router.
//!
//! Composes all handlers into a single Axum router.

use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Create the review service router.
///
/// # Routes
///
/// - `GET /` - List reviews, filtered and ranked by sentiment
/// - `POST /` - Submit a review
/// - `GET /health` - Liveness
/// - `GET /health/ready` - Readiness with store diagnostics
/// - `GET /metrics` - Prometheus metrics, only when a handle is attached
///
/// Any other path behaves like `/`.
///
/// # Example
///
/// ```rust,ignore
/// let state = AppState::new(store, ReviewEnvironment::production(scorer));
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
/// axum::serve(listener, build_router(state)).await?;
/// ```
pub fn build_router(state: AppState) -> Router {
    let reviews = get(handlers::list_reviews).post(handlers::create_review);

    let mut router = Router::new()
        .route("/", reviews.clone())
        .route("/health", get(handlers::health_check))
        .route("/health/ready", get(handlers::health_check_with_store))
        .fallback(reviews);

    if state.metrics.is_some() {
        router = router.route("/metrics", get(handlers::metrics::metrics));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
