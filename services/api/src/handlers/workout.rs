use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use trainlog_core::envelope::JsonEnvelope;

use crate::domain::repository::{UserRepository, WorkoutRepository};
use crate::domain::types::{Workout, WorkoutEntry, WorkoutPatch};
use crate::error::ApiError;
use crate::handlers::params::{JsonBody, WorkoutId};
use crate::state::AppState;
use crate::usecase::workout::{
    CreateWorkoutUseCase, DeleteWorkoutUseCase, GetWorkoutUseCase, UpdateWorkoutUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

/// Entry as sent by clients. `id` and `workout_id` are store-assigned and ignored here.
#[derive(Debug, Deserialize)]
pub struct WorkoutEntryRequest {
    pub name: String,
    #[serde(default)]
    pub notes: String,
    pub sets: i32,
    pub reps: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub weight: Option<f64>,
    /// Defaults to the entry's position in the request array.
    pub order_index: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    #[serde(default)]
    pub entries: Vec<WorkoutEntryRequest>,
}

/// Partial update. Absent (or `null`) fields keep their stored value;
/// `entries`, when given, replaces the whole list.
#[derive(Debug, Deserialize)]
pub struct UpdateWorkoutRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Option<i32>,
    pub entries: Option<Vec<WorkoutEntryRequest>>,
}

fn into_entries(entries: Vec<WorkoutEntryRequest>) -> Vec<WorkoutEntry> {
    entries
        .into_iter()
        .enumerate()
        .map(|(position, entry)| WorkoutEntry {
            id: 0,
            workout_id: 0,
            name: entry.name,
            notes: entry.notes,
            sets: entry.sets,
            reps: entry.reps,
            duration_seconds: entry.duration_seconds,
            weight: entry.weight,
            order_index: entry
                .order_index
                .unwrap_or_else(|| i32::try_from(position).unwrap_or(i32::MAX)),
        })
        .collect()
}

impl From<CreateWorkoutRequest> for Workout {
    fn from(req: CreateWorkoutRequest) -> Self {
        Workout {
            id: 0,
            title: req.title,
            description: req.description,
            duration_minutes: req.duration_minutes,
            calories_burned: req.calories_burned,
            entries: into_entries(req.entries),
        }
    }
}

impl From<UpdateWorkoutRequest> for WorkoutPatch {
    fn from(req: UpdateWorkoutRequest) -> Self {
        WorkoutPatch {
            title: req.title,
            description: req.description,
            duration_minutes: req.duration_minutes,
            calories_burned: req.calories_burned,
            entries: req.entries.map(into_entries),
        }
    }
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct WorkoutEntryResponse {
    pub id: i64,
    pub workout_id: i64,
    pub name: String,
    pub notes: String,
    pub sets: i32,
    pub reps: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub weight: Option<f64>,
    pub order_index: i32,
}

#[derive(Debug, Serialize)]
pub struct WorkoutResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub entries: Vec<WorkoutEntryResponse>,
}

impl From<Workout> for WorkoutResponse {
    fn from(workout: Workout) -> Self {
        WorkoutResponse {
            id: workout.id,
            title: workout.title,
            description: workout.description,
            duration_minutes: workout.duration_minutes,
            calories_burned: workout.calories_burned,
            entries: workout
                .entries
                .into_iter()
                .map(|entry| WorkoutEntryResponse {
                    id: entry.id,
                    workout_id: entry.workout_id,
                    name: entry.name,
                    notes: entry.notes,
                    sets: entry.sets,
                    reps: entry.reps,
                    duration_seconds: entry.duration_seconds,
                    weight: entry.weight,
                    order_index: entry.order_index,
                })
                .collect(),
        }
    }
}

// ── POST /workouts ───────────────────────────────────────────────────────────

pub async fn create_workout<W: WorkoutRepository, U: UserRepository>(
    State(state): State<AppState<W, U>>,
    JsonBody(body): JsonBody<CreateWorkoutRequest>,
) -> Result<JsonEnvelope<WorkoutResponse>, ApiError> {
    let usecase = CreateWorkoutUseCase {
        repo: state.workout_repo(),
    };
    let workout = usecase.execute(body.into()).await?;
    Ok(JsonEnvelope::data(StatusCode::CREATED, workout.into()))
}

// ── GET /workouts/{id} ───────────────────────────────────────────────────────

pub async fn get_workout<W: WorkoutRepository, U: UserRepository>(
    State(state): State<AppState<W, U>>,
    WorkoutId(id): WorkoutId,
) -> Result<JsonEnvelope<WorkoutResponse>, ApiError> {
    let usecase = GetWorkoutUseCase {
        repo: state.workout_repo(),
    };
    let workout = usecase.execute(id).await?;
    Ok(JsonEnvelope::data(StatusCode::OK, workout.into()))
}

// ── PUT /workouts/{id} ───────────────────────────────────────────────────────

/// A body that fails to decode is reported only once the workout is known to exist.
pub async fn update_workout<W: WorkoutRepository, U: UserRepository>(
    State(state): State<AppState<W, U>>,
    WorkoutId(id): WorkoutId,
    body: Result<JsonBody<UpdateWorkoutRequest>, ApiError>,
) -> Result<JsonEnvelope<WorkoutResponse>, ApiError> {
    let usecase = UpdateWorkoutUseCase {
        repo: state.workout_repo(),
    };
    let patch = body.map(|JsonBody(body)| WorkoutPatch::from(body));
    let workout = usecase.execute(id, patch).await?;
    Ok(JsonEnvelope::data(StatusCode::OK, workout.into()))
}

// ── DELETE /workouts/{id} ────────────────────────────────────────────────────

pub async fn delete_workout<W: WorkoutRepository, U: UserRepository>(
    State(state): State<AppState<W, U>>,
    WorkoutId(id): WorkoutId,
) -> Result<JsonEnvelope<()>, ApiError> {
    let usecase = DeleteWorkoutUseCase {
        repo: state.workout_repo(),
    };
    usecase.execute(id).await?;
    Ok(JsonEnvelope::message(
        StatusCode::OK,
        "workout deleted successfully",
    ))
}
