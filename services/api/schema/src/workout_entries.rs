use sea_orm::entity::prelude::*;

/// One exercise within a workout, positioned by `order_index`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "workout_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workouts::Entity",
        from = "Column::WorkoutId",
        to = "super::workouts::Column::Id",
        on_delete = "Cascade"
    )]
    Workout,
}

impl Related<super::workouts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workout.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
