//! Axum HTTP layer for the review service.
//!
//! The handlers here are the imperative shell around `review-analyzer-core`:
//! they pull data out of requests, take a store snapshot or append to it, and
//! turn the result into a response. Filtering, ranking and validation stay in
//! the core.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** the query (`ReviewFilter`) or raw body (`SubmissionBody`)
//! 3. **Read** a store snapshot, or **validate** the submission
//! 4. **Rank** the snapshot on the blocking pool, or **append** the review
//! 5. **Return** indented JSON, or a plain-text rejection
//!
//! # Example
//!
//! ```ignore
//! use review_analyzer_web::{AppState, build_router};
//!
//! let state = AppState::new(Arc::new(store), ReviewEnvironment::production(scorer));
//! let app = build_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{ReviewFilter, SubmissionBody};
pub use response::PrettyJson;
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
