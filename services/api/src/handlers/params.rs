use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::ApiError;

/// Numeric `{id}` path segment. Rejects with `InvalidId` when absent or not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for WorkoutId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId)?;
        parse_id(&raw).map(WorkoutId)
    }
}

pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    if raw.is_empty() {
        return Err(ApiError::InvalidId);
    }
    raw.parse::<i64>().map_err(|_| ApiError::InvalidId)
}

/// `axum::Json` whose rejections render as `{"error": ..}` with status 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
