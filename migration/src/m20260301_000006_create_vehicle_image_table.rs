use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000005_create_vehicle_table::Vehicles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VehicleImages::Table)
                    .if_not_exists()
                    .col(pk_uuid(VehicleImages::Id))
                    .col(uuid(VehicleImages::VehicleId))
                    .col(text(VehicleImages::ImageUrl))
                    .col(
                        timestamp_with_time_zone(VehicleImages::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(VehicleImages::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_images_vehicle_id")
                            .from(VehicleImages::Table, VehicleImages::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehicleImages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VehicleImages {
    Table,
    Id,
    VehicleId,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}
