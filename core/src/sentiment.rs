//! The sentiment capability the read path depends on.
//!
//! Scoring itself lives outside this crate; the core only needs something
//! that turns review text into a [`SentimentScore`].

use serde::Serialize;

/// Polarity breakdown of a piece of text.
///
/// `neg`, `neu` and `pos` are proportions in `[0, 1]` summing to roughly one.
/// `compound` is the normalized overall polarity in `[-1, 1]` and is the only
/// field used for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScore {
    /// Share of negative sentiment
    pub neg: f64,
    /// Share of neutral sentiment
    pub neu: f64,
    /// Share of positive sentiment
    pub pos: f64,
    /// Normalized overall polarity
    pub compound: f64,
}

impl SentimentScore {
    /// A fully neutral score.
    pub const NEUTRAL: Self = Self {
        neg: 0.0,
        neu: 1.0,
        pos: 0.0,
        compound: 0.0,
    };
}

/// Turns text into a [`SentimentScore`].
///
/// Implementations must be deterministic: the same text always yields the
/// same score. They are called from blocking worker threads, so they must be
/// `Send + Sync` and must not touch shared mutable state.
pub trait SentimentScorer: Send + Sync {
    /// Score `text`.
    fn score(&self, text: &str) -> SentimentScore;
}
