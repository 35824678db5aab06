//! The Prometheus scrape route with a recorder installed.
//!
//! Installing the recorder is process-global, so this lives in its own test
//! binary.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use review_analyzer_runtime::{MetricsRecorder, ReviewStore};
use review_analyzer_testing::{StubScorer, fixtures, test_environment};
use review_analyzer_web::{AppState, build_router};
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn test_metrics_route_renders_recorded_queries() {
    // Arrange
    let mut recorder = MetricsRecorder::new();
    recorder.install().unwrap();
    let handle = recorder.handle().cloned().expect("recorder should be installed");

    let store = Arc::new(ReviewStore::with_reviews(fixtures::sample_reviews()));
    let state = AppState::new(store, test_environment(StubScorer::new())).with_metrics(Some(handle));
    let app = build_router(state);

    // Act
    let listing = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let scrape = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // Assert
    assert_eq!(listing.status(), StatusCode::OK);
    assert_eq!(scrape.status(), StatusCode::OK);
    assert_eq!(
        scrape.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "text/plain; version=0.0.4"
    );
    let body = to_bytes(scrape.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("review_queries_total"), "scrape was: {text}");
}
