//! # Review Analyzer Core
//!
//! Domain types and pure logic for the review service.
//!
//! This crate decides which reviews a query returns, in what order, with what
//! computed fields, and what makes a submitted review acceptable. It performs
//! no I/O: storage, HTTP and the concrete sentiment scorer live in other
//! crates and reach the core through the traits in [`environment`] and
//! [`sentiment`].
//!
//! ## Core Concepts
//!
//! - **Review**: an immutable customer review ([`review::Review`])
//! - **Query**: optional location and date criteria ([`query::ReviewQuery`])
//! - **Ranking**: sentiment annotation sorted by compound score ([`ranking::rank`])
//! - **Submission**: decode + validate a new review ([`submission`])
//! - **Environment**: injected clock, id generator and scorer
//!
//! ## Example
//!
//! ```ignore
//! use review_analyzer_core::{rank, ReviewQuery};
//!
//! let snapshot = store.snapshot().await;
//! let query = ReviewQuery::new().with_location("Denver, Colorado");
//! let results = rank(query.apply(&snapshot), scorer.as_ref());
//! ```

// Re-export commonly used types
pub use chrono::NaiveDateTime;

pub mod environment;
pub mod query;
pub mod ranking;
pub mod review;
pub mod sentiment;
pub mod submission;

pub use environment::{Clock, IdGenerator, ReviewEnvironment, SystemClock, UuidGenerator};
pub use query::{DateBound, ReviewQuery};
pub use ranking::{ScoredReview, rank};
pub use review::{Location, Review, ReviewId, TIMESTAMP_FORMAT, Timestamp, VALID_LOCATIONS};
pub use sentiment::{SentimentScore, SentimentScorer};
pub use submission::{PayloadEncoding, RawSubmission, SubmissionError, accept_submission};
