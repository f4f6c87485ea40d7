use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkoutEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkoutEntries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WorkoutEntries::WorkoutId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WorkoutEntries::Name).string().not_null())
                    .col(
                        ColumnDef::new(WorkoutEntries::Notes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(WorkoutEntries::Sets).integer().not_null())
                    .col(ColumnDef::new(WorkoutEntries::Reps).integer().null())
                    .col(
                        ColumnDef::new(WorkoutEntries::DurationSeconds)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(WorkoutEntries::Weight).double().null())
                    .col(
                        ColumnDef::new(WorkoutEntries::OrderIndex)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workout_entries_workout_id")
                            .from(WorkoutEntries::Table, WorkoutEntries::WorkoutId)
                            .to(Workouts::Table, Workouts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_workout_entries_workout_id")
                    .table(WorkoutEntries::Table)
                    .col(WorkoutEntries::WorkoutId)
                    .col(WorkoutEntries::OrderIndex)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkoutEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WorkoutEntries {
    Table,
    Id,
    WorkoutId,
    Name,
    Notes,
    Sets,
    Reps,
    DurationSeconds,
    Weight,
    OrderIndex,
}

#[derive(Iden)]
enum Workouts {
    Table,
    Id,
}
