use sea_orm::DatabaseConnection;

use crate::infra::db::{DbUserRepository, DbWorkoutRepository};

/// Shared application state passed to every handler via axum `State`.
///
/// Generic over the stores so tests can swap in fakes; production uses the
/// sea-orm repositories sharing one connection pool.
#[derive(Clone)]
pub struct AppState<W = DbWorkoutRepository, U = DbUserRepository> {
    pub workouts: W,
    pub users: U,
}

impl AppState {
    pub fn from_db(db: DatabaseConnection) -> Self {
        Self {
            workouts: DbWorkoutRepository { db: db.clone() },
            users: DbUserRepository { db },
        }
    }
}

impl<W: Clone, U> AppState<W, U> {
    pub fn workout_repo(&self) -> W {
        self.workouts.clone()
    }
}

impl<W, U: Clone> AppState<W, U> {
    pub fn user_repo(&self) -> U {
        self.users.clone()
    }
}
