//! VADER-backed implementation of [`SentimentScorer`].
//!
//! Scores come from the VADER lexicon and rules: per-word valences adjusted by
//! boosters, negations, ALL-CAPS emphasis, a contrastive "but" and `!` / `?`
//! runs, normalized into a compound score in `[-1, 1]`.

use review_analyzer_core::{SentimentScore, SentimentScorer};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Sentiment scorer over the full VADER English lexicon.
///
/// The lexicon is loaded once per process and shared; one instance can be
/// shared across threads.
pub struct LexiconScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl LexiconScorer {
    /// Create a scorer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Score `text`.
    ///
    /// Text without any words scores [`SentimentScore::NEUTRAL`].
    #[must_use]
    pub fn polarity(&self, text: &str) -> SentimentScore {
        if !text.chars().any(char::is_alphanumeric) {
            return SentimentScore::NEUTRAL;
        }
        let scores = self.analyzer.polarity_scores(text);
        let part = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        let (neg, neu, pos) = (part("neg"), part("neu"), part("pos"));
        if neg + neu + pos <= f64::EPSILON {
            return SentimentScore::NEUTRAL;
        }
        SentimentScore {
            neg,
            neu,
            pos,
            compound: part("compound"),
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LexiconScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexiconScorer").finish_non_exhaustive()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScore {
        self.polarity(text)
    }
}
