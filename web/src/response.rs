//! Indented JSON responses.

use crate::error::AppError;
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body rendered with two-space indentation.
///
/// Behaves like [`axum::Json`] but pretty-prints and carries its own status.
#[derive(Debug, Clone)]
pub struct PrettyJson<T> {
    status: StatusCode,
    value: T,
}

impl<T> PrettyJson<T> {
    /// `200 OK` with `value` as the body.
    pub const fn ok(value: T) -> Self {
        Self {
            status: StatusCode::OK,
            value,
        }
    }

    /// `201 Created` with `value` as the body.
    pub const fn created(value: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            value,
        }
    }
}

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec_pretty(&self.value) {
            Ok(body) => (
                self.status,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            Err(err) => AppError::from(anyhow::Error::from(err)).into_response(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn renders_indented_json() {
        let response = PrettyJson::created(vec![1, 2]).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
            "application/json"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"[\n  1,\n  2\n]");
    }

    #[tokio::test]
    async fn empty_list_is_brackets() {
        let response = PrettyJson::ok(Vec::<u8>::new()).into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"[]");
    }
}
