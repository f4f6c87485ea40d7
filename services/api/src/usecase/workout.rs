use crate::domain::repository::WorkoutRepository;
use crate::domain::types::{Workout, WorkoutPatch};
use crate::error::ApiError;

// ── CreateWorkout ────────────────────────────────────────────────────────────

pub struct CreateWorkoutUseCase<R: WorkoutRepository> {
    pub repo: R,
}

impl<R: WorkoutRepository> CreateWorkoutUseCase<R> {
    pub async fn execute(&self, workout: Workout) -> Result<Workout, ApiError> {
        let created = self.repo.create(workout).await?;
        tracing::info!(
            workout_id = created.id,
            entries = created.entries.len(),
            "workout created"
        );
        Ok(created)
    }
}

// ── GetWorkout ───────────────────────────────────────────────────────────────

pub struct GetWorkoutUseCase<R: WorkoutRepository> {
    pub repo: R,
}

impl<R: WorkoutRepository> GetWorkoutUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<Workout, ApiError> {
        Ok(self.repo.find_by_id(id).await?)
    }
}

// ── UpdateWorkout ────────────────────────────────────────────────────────────

pub struct UpdateWorkoutUseCase<R: WorkoutRepository> {
    pub repo: R,
}

impl<R: WorkoutRepository> UpdateWorkoutUseCase<R> {
    /// Merge `patch` onto the stored workout and write the result back.
    ///
    /// The lookup runs first, so an unknown id wins over an undecodable patch.
    pub async fn execute(
        &self,
        id: i64,
        patch: Result<WorkoutPatch, ApiError>,
    ) -> Result<Workout, ApiError> {
        let existing = self.repo.find_by_id(id).await?;
        let merged = patch?.apply_to(existing);
        Ok(self.repo.update(merged).await?)
    }
}

// ── DeleteWorkout ────────────────────────────────────────────────────────────

pub struct DeleteWorkoutUseCase<R: WorkoutRepository> {
    pub repo: R,
}

impl<R: WorkoutRepository> DeleteWorkoutUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<(), ApiError> {
        self.repo.delete_by_id(id).await?;
        tracing::info!(workout_id = id, "workout deleted");
        Ok(())
    }
}
