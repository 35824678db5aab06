//! Sentiment annotation and ordering of query results.

use crate::review::Review;
use crate::sentiment::{SentimentScore, SentimentScorer};
use serde::Serialize;

/// A review together with the sentiment computed for this read.
///
/// This is a response view: the stored [`Review`] is cloned, never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredReview {
    /// The review as stored
    #[serde(flatten)]
    pub review: Review,
    /// Sentiment of the review body
    pub sentiment: SentimentScore,
}

/// Score each review and order the results by descending compound score.
///
/// Only the reviews passed in are scored, so callers filter first. The sort
/// is stable: reviews with equal compound scores keep their input order.
pub fn rank<'a, I>(reviews: I, scorer: &dyn SentimentScorer) -> Vec<ScoredReview>
where
    I: IntoIterator<Item = &'a Review>,
{
    let mut scored: Vec<ScoredReview> = reviews
        .into_iter()
        .map(|review| ScoredReview {
            sentiment: scorer.score(&review.body),
            review: review.clone(),
        })
        .collect();

    scored.sort_by(|a, b| sort_key(b).total_cmp(&sort_key(a)));
    scored
}

/// Compound score with `-0.0` folded into `0.0` so the two tie.
fn sort_key(scored: &ScoredReview) -> f64 {
    // -0.0 + 0.0 == +0.0
    scored.sentiment.compound + 0.0
}
