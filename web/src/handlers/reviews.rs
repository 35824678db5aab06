//! Review listing and submission.

use crate::WebResult;
use crate::extractors::{ReviewFilter, SubmissionBody};
use crate::response::PrettyJson;
use crate::state::AppState;
use anyhow::Context;
use axum::extract::State;
use review_analyzer_core::{Review, ScoredReview, accept_submission, rank};
use review_analyzer_runtime::ReviewMetrics;
use std::sync::Arc;
use std::time::Instant;

/// List reviews matching the query, most positive first.
///
/// # Endpoint
///
/// ```text
/// GET /?location=Denver%2C+Colorado&start_date=2021-01-01&end_date=2021-12-31
/// ```
///
/// Every parameter is optional. A date that does not parse is ignored.
///
/// # Errors
///
/// Returns a 500 if the ranking task fails.
#[tracing::instrument(skip_all)]
pub async fn list_reviews(
    State(state): State<AppState>,
    ReviewFilter(query): ReviewFilter,
) -> WebResult<PrettyJson<Vec<ScoredReview>>> {
    let started = Instant::now();
    let snapshot = state.store.snapshot().await;
    let scorer = Arc::clone(&state.environment.scorer);

    tracing::debug!(
        location = ?query.location,
        start_date = ?query.start_date,
        end_date = ?query.end_date,
        stored = snapshot.len(),
        "Listing reviews"
    );

    // Scoring is CPU-bound; keep it off the async workers.
    let ranked = tokio::task::spawn_blocking(move || rank(query.apply(&snapshot), scorer.as_ref()))
        .await
        .context("review ranking task failed")?;

    ReviewMetrics::record_query(ranked.len(), started.elapsed());
    tracing::debug!(results = ranked.len(), "Reviews listed");

    Ok(PrettyJson::ok(ranked))
}

/// Validate and store a new review.
///
/// # Endpoint
///
/// ```text
/// POST /
/// Content-Type: application/json
///
/// {"Location": "Denver, Colorado", "ReviewBody": "Great service!"}
/// ```
///
/// Form-encoded bodies are accepted as well. Responds `201 Created` with the
/// stored review.
///
/// # Errors
///
/// Returns a 400 with the rejection reason when the submission is invalid.
#[tracing::instrument(skip_all)]
pub async fn create_review(
    State(state): State<AppState>,
    body: SubmissionBody,
) -> WebResult<PrettyJson<Review>> {
    let environment = &state.environment;
    let review = accept_submission(
        &body.bytes,
        body.encoding,
        environment.clock.as_ref(),
        environment.ids.as_ref(),
    )
    .inspect_err(|err| {
        ReviewMetrics::record_rejected(err.reason());
        tracing::debug!(reason = err.reason(), encoding = %body.encoding, "Review rejected");
    })?;

    state.store.append(review.clone()).await;
    ReviewMetrics::record_created();
    tracing::info!(review_id = %review.id, location = %review.location, "Review created");

    Ok(PrettyJson::created(review))
}
