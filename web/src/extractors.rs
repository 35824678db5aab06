//! Custom Axum extractors.
//!
//! - `SubmissionBody`: raw POST body plus the encoding its `Content-Type`
//!   declares
//! - `ReviewFilter`: the read query built from the query string
//!
//! # Examples
//!
//! ```ignore
//! async fn handler(ReviewFilter(query): ReviewFilter, body: SubmissionBody) {
//!     tracing::debug!(unfiltered = query.is_unfiltered(), encoding = %body.encoding);
//! }
//! ```

use crate::error::AppError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use review_analyzer_core::{PayloadEncoding, ReviewQuery};

/// A review submission body, not yet decoded.
///
/// Decoding is left to the handler so every rejection, including an empty
/// or malformed body, goes through the same validation path.
#[derive(Debug, Clone)]
pub struct SubmissionBody {
    /// Encoding declared by the `Content-Type` header
    pub encoding: PayloadEncoding,
    /// Raw body bytes
    pub bytes: Bytes,
}

#[async_trait]
impl<S> FromRequest<S> for SubmissionBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let encoding = PayloadEncoding::from_content_type(
            req.headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::new(rejection.status(), rejection.body_text(), "BODY_REJECTED")
            })?;

        Ok(Self { encoding, bytes })
    }
}

/// Query criteria taken from `location`, `start_date` and `end_date`.
///
/// Never rejects: a query string that cannot be decoded serves as an
/// unfiltered read.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter(pub ReviewQuery);

#[async_trait]
impl<S> FromRequestParts<S> for ReviewFilter
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts.uri.query().unwrap_or_default();
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "Unreadable query string, applying no filters");
            Vec::new()
        });

        Ok(Self(ReviewQuery::from_pairs(pairs)))
    }
}
