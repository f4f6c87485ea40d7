use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use trainlog_core::envelope::JsonEnvelope;

use crate::domain::repository::{UserRepository, WorkoutRepository};
use crate::domain::types::User;
use crate::error::ApiError;
use crate::handlers::params::JsonBody;
use crate::state::AppState;
use crate::usecase::user::{RegisterUserInput, RegisterUserUseCase};

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(serialize_with = "trainlog_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "trainlog_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub async fn create_user<W: WorkoutRepository, U: UserRepository>(
    State(state): State<AppState<W, U>>,
    JsonBody(body): JsonBody<RegisterUserRequest>,
) -> Result<JsonEnvelope<UserResponse>, ApiError> {
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterUserInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(JsonEnvelope::data(StatusCode::CREATED, user.into()))
}
