//! sea-orm entities for the Trainlog API database.

pub mod users;
pub mod workout_entries;
pub mod workouts;
