use std::time::Duration;

use axum::{
    Router,
    http::{StatusCode, header},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use trainlog_core::envelope::JsonEnvelope;
use trainlog_core::health::health;
use trainlog_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::domain::repository::{UserRepository, WorkoutRepository};
use crate::handlers::{
    user::create_user,
    workout::{create_workout, delete_workout, get_workout, update_workout},
};
use crate::state::AppState;

pub fn build_router<W: WorkoutRepository, U: UserRepository>(
    state: AppState<W, U>,
    request_timeout: Duration,
) -> Router {
    Router::new()
        // Health
        .route("/health", get(health))
        // Users
        .route("/users", post(create_user::<W, U>))
        // Workouts
        .route("/workouts", post(create_workout::<W, U>))
        .route(
            "/workouts/{id}",
            get(get_workout::<W, U>)
                .put(update_workout::<W, U>)
                .delete(delete_workout::<W, U>),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(map_response(timeout_as_json))
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
}

/// `TimeoutLayer` answers with an empty 408; give it the usual error body.
async fn timeout_as_json(resp: Response) -> Response {
    if resp.status() != StatusCode::REQUEST_TIMEOUT
        || resp.headers().contains_key(header::CONTENT_TYPE)
    {
        return resp;
    }
    tracing::warn!("request timed out");
    JsonEnvelope::error(StatusCode::REQUEST_TIMEOUT, "request timed out").into_response()
}
