//! # Review Analyzer Sentiment
//!
//! Sentiment scoring for short English review text, implementing
//! [`review_analyzer_core::SentimentScorer`] with the VADER lexicon and rules
//! (via the `vader_sentiment` crate).
//!
//! Scores carry the negative, neutral and positive shares of the text and a
//! compound score in `[-1, 1]`; text without words is neutral.
//!
//! ## Example
//!
//! ```
//! use review_analyzer_sentiment::LexiconScorer;
//!
//! let score = LexiconScorer::new().polarity("Great service!");
//! assert!(score.compound > 0.5);
//! ```

pub mod scorer;

pub use scorer::LexiconScorer;
