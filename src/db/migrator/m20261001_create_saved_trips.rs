use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SavedTrips::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SavedTrips::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SavedTrips::Origin).string().not_null())
                    .col(ColumnDef::new(SavedTrips::Destination).string().not_null())
                    .col(ColumnDef::new(SavedTrips::Cost).big_integer().not_null())
                    .col(ColumnDef::new(SavedTrips::Duration).big_integer().not_null())
                    .col(ColumnDef::new(SavedTrips::TripType).string().not_null())
                    .col(ColumnDef::new(SavedTrips::DisplayName).string().not_null())
                    .col(ColumnDef::new(SavedTrips::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_saved_trips_created_at")
                    .table(SavedTrips::Table)
                    .col(SavedTrips::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavedTrips::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SavedTrips {
    Table,
    Id,
    Origin,
    Destination,
    Cost,
    Duration,
    TripType,
    DisplayName,
    CreatedAt,
}
