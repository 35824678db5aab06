//! HTTP request handlers.
//!
//! This module contains all HTTP handlers organized by concern.

pub mod health;
pub mod metrics;
pub mod reviews;

// Re-export common handler utilities
pub use health::{health_check, health_check_with_store};
pub use reviews::{create_review, list_reviews};
