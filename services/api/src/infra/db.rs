use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionError, TransactionTrait,
};

use trainlog_api_schema::{users, workout_entries, workouts};
use trainlog_core::sea_ext::DbErrExt as _;

use crate::domain::repository::{UserRepository, WorkoutRepository};
use crate::domain::types::{NewUser, User, Workout, WorkoutEntry};
use crate::error::{Stage, StoreError};

// ── Workout repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbWorkoutRepository {
    pub db: DatabaseConnection,
}

impl WorkoutRepository for DbWorkoutRepository {
    async fn create(&self, workout: Workout) -> Result<Workout, StoreError> {
        const OP: &str = "create workout";
        self.db
            .transaction::<_, Workout, StoreError>(|txn| {
                Box::pin(async move {
                    let mut workout = workout;
                    let row = workouts::ActiveModel {
                        title: Set(workout.title.clone()),
                        description: Set(workout.description.clone()),
                        duration_minutes: Set(workout.duration_minutes),
                        calories_burned: Set(workout.calories_burned),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(StoreError::storage(OP, Stage::InsertWorkout))?;
                    workout.id = row.id;

                    insert_entries(txn, OP, &mut workout).await?;
                    Ok(workout)
                })
            })
            .await
            .map_err(|e| flatten_transaction_error(OP, e))
    }

    async fn find_by_id(&self, id: i64) -> Result<Workout, StoreError> {
        const OP: &str = "get workout";
        let row = workouts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(StoreError::storage(OP, Stage::SelectWorkout))?
            .ok_or(StoreError::NotFound)?;

        let entries = workout_entries::Entity::find()
            .filter(workout_entries::Column::WorkoutId.eq(id))
            .order_by_asc(workout_entries::Column::OrderIndex)
            .order_by_asc(workout_entries::Column::Id)
            .all(&self.db)
            .await
            .map_err(StoreError::storage(OP, Stage::SelectEntries))?;

        Ok(Workout {
            id: row.id,
            title: row.title,
            description: row.description,
            duration_minutes: row.duration_minutes,
            calories_burned: row.calories_burned,
            entries: entries.into_iter().map(entry_from_model).collect(),
        })
    }

    async fn update(&self, workout: Workout) -> Result<Workout, StoreError> {
        const OP: &str = "update workout";
        self.db
            .transaction::<_, Workout, StoreError>(|txn| {
                Box::pin(async move {
                    let mut workout = workout;
                    let updated = workouts::ActiveModel {
                        id: Set(workout.id),
                        title: Set(workout.title.clone()),
                        description: Set(workout.description.clone()),
                        duration_minutes: Set(workout.duration_minutes),
                        calories_burned: Set(workout.calories_burned),
                    }
                    .update(txn)
                    .await;
                    match updated {
                        Ok(_) => {}
                        Err(DbErr::RecordNotUpdated) => return Err(StoreError::NotFound),
                        Err(e) => return Err(StoreError::storage(OP, Stage::UpdateWorkout)(e)),
                    }

                    workout_entries::Entity::delete_many()
                        .filter(workout_entries::Column::WorkoutId.eq(workout.id))
                        .exec(txn)
                        .await
                        .map_err(StoreError::storage(OP, Stage::ClearEntries))?;

                    insert_entries(txn, OP, &mut workout).await?;
                    Ok(workout)
                })
            })
            .await
            .map_err(|e| flatten_transaction_error(OP, e))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        // workout_entries rows are removed by the ON DELETE CASCADE foreign key.
        let result = workouts::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(StoreError::storage("delete workout", Stage::DeleteWorkout))?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

/// Insert `workout.entries` in order, writing each generated id back into its slot.
async fn insert_entries(
    txn: &DatabaseTransaction,
    op: &'static str,
    workout: &mut Workout,
) -> Result<(), StoreError> {
    let workout_id = workout.id;
    for (index, entry) in workout.entries.iter_mut().enumerate() {
        let row = workout_entries::ActiveModel {
            workout_id: Set(workout_id),
            name: Set(entry.name.clone()),
            notes: Set(entry.notes.clone()),
            sets: Set(entry.sets),
            reps: Set(entry.reps),
            duration_seconds: Set(entry.duration_seconds),
            weight: Set(entry.weight),
            order_index: Set(entry.order_index),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(StoreError::storage(op, Stage::InsertEntry(index)))?;
        entry.id = row.id;
        entry.workout_id = row.workout_id;
    }
    Ok(())
}

fn flatten_transaction_error(op: &'static str, err: TransactionError<StoreError>) -> StoreError {
    match err {
        TransactionError::Connection(source) => StoreError::storage(op, Stage::Transaction)(source),
        TransactionError::Transaction(inner) => inner,
    }
}

fn entry_from_model(model: workout_entries::Model) -> WorkoutEntry {
    WorkoutEntry {
        id: model.id,
        workout_id: model.workout_id,
        name: model.name,
        notes: model.notes,
        sets: model.sets,
        reps: model.reps,
        duration_seconds: model.duration_seconds,
        weight: model.weight,
        order_index: model.order_index,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let now = Utc::now();
        let row = users::ActiveModel {
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if e.violates_unique("email") {
                StoreError::DuplicateEmail
            } else if e.violates_unique("username") {
                StoreError::DuplicateUsername
            } else {
                StoreError::storage("create user", Stage::InsertUser)(e)
            }
        })?;
        Ok(user_from_model(row))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(StoreError::storage("get user", Stage::SelectUser))?;
        Ok(row.map(user_from_model))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
