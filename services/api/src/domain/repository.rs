use crate::domain::types::{NewUser, User, Workout};
use crate::error::StoreError;

/// Persistence for workouts and their ordered entries.
///
/// Writes touching more than one row run in a single transaction.
pub trait WorkoutRepository: Clone + Send + Sync + 'static {
    /// Insert the workout and its entries in sequence order. Incoming ids are ignored;
    /// the returned workout carries the generated ones.
    fn create(&self, workout: Workout)
    -> impl Future<Output = Result<Workout, StoreError>> + Send;

    /// Fetch a workout with its entries ordered by `order_index`.
    fn find_by_id(&self, id: i64) -> impl Future<Output = Result<Workout, StoreError>> + Send;

    /// Overwrite the scalar columns and replace the entry set with `workout.entries`.
    fn update(&self, workout: Workout)
    -> impl Future<Output = Result<Workout, StoreError>> + Send;

    /// Delete a workout; its entries go with it. `NotFound` if no row was deleted.
    fn delete_by_id(&self, id: i64) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Persistence for user accounts.
pub trait UserRepository: Clone + Send + Sync + 'static {
    /// Insert a user. Fails with `DuplicateEmail` / `DuplicateUsername` on a taken value.
    fn create(&self, user: NewUser) -> impl Future<Output = Result<User, StoreError>> + Send;

    /// Look up a user by exact username. `Ok(None)` when no row matches.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;
}
