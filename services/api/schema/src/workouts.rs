use sea_orm::entity::prelude::*;

/// Workout session header; its exercises live in `workout_entries`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "workouts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::workout_entries::Entity")]
    WorkoutEntries,
}

impl Related<super::workout_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkoutEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
