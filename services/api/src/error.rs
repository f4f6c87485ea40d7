use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;

use trainlog_core::envelope::JsonEnvelope;

/// Sub-step of a store operation, recorded on storage failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Opening or committing the transaction.
    Transaction,
    InsertWorkout,
    /// Inserting the entry at this position of the supplied sequence.
    InsertEntry(usize),
    SelectWorkout,
    SelectEntries,
    UpdateWorkout,
    ClearEntries,
    DeleteWorkout,
    InsertUser,
    SelectUser,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transaction => f.write_str("transaction"),
            Self::InsertWorkout => f.write_str("insert workout"),
            Self::InsertEntry(index) => write!(f, "insert entry #{index}"),
            Self::SelectWorkout => f.write_str("select workout"),
            Self::SelectEntries => f.write_str("select entries"),
            Self::UpdateWorkout => f.write_str("update workout"),
            Self::ClearEntries => f.write_str("delete entries"),
            Self::DeleteWorkout => f.write_str("delete workout"),
            Self::InsertUser => f.write_str("insert user"),
            Self::SelectUser => f.write_str("select user"),
        }
    }
}

/// Errors returned by the stores. Carries no HTTP meaning.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("workout not found")]
    NotFound,
    #[error("email already exists")]
    DuplicateEmail,
    #[error("username already exists")]
    DuplicateUsername,
    #[error("{op}: {stage}: {source}")]
    Storage {
        op: &'static str,
        stage: Stage,
        #[source]
        source: DbErr,
    },
}

impl StoreError {
    pub fn storage(op: &'static str, stage: Stage) -> impl FnOnce(DbErr) -> Self {
        move |source| Self::Storage { op, stage, source }
    }
}

/// Handler-level errors, mapped to status codes and `{"error": ..}` bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("invalid workout id")]
    InvalidId,
    #[error("email address already exists")]
    EmailTaken,
    #[error("username already exists")]
    UsernameTaken,
    #[error("workout not found")]
    WorkoutNotFound,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidId => "INVALID_ID",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::WorkoutNotFound => "WORKOUT_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidBody(_)
            | Self::InvalidId
            | Self::EmailTaken
            | Self::UsernameTaken => StatusCode::BAD_REQUEST,
            Self::WorkoutNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::WorkoutNotFound,
            StoreError::DuplicateEmail => Self::EmailTaken,
            StoreError::DuplicateUsername => Self::UsernameTaken,
            storage @ StoreError::Storage { .. } => Self::Internal(storage.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client errors; only the cause of a 500 is worth an error line.
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind = self.kind(), "internal error"),
            _ => tracing::debug!(kind = self.kind(), message = %self, "request rejected"),
        }
        JsonEnvelope::error(status, self.to_string()).into_response()
    }
}
