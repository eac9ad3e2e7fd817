use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000002_create_model_table::Models, m20260301_000003_create_user_table::Users,
    m20260301_000004_create_customer_table::Customers,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(pk_uuid(Vehicles::Id))
                    .col(integer(Vehicles::ModelId))
                    .col(uuid(Vehicles::UserId))
                    .col(uuid_null(Vehicles::CustomerId))
                    .col(string(Vehicles::Year))
                    .col(string_len_uniq(Vehicles::Vin, 17))
                    .col(string(Vehicles::Street))
                    .col(string(Vehicles::City))
                    .col(string(Vehicles::State))
                    .col(string(Vehicles::Country))
                    .col(string(Vehicles::Zipcode))
                    .col(string_len(Vehicles::Status, 16).default("in stock"))
                    .col(string(Vehicles::Location).default(""))
                    .col(timestamp_with_time_zone_null(Vehicles::AssignedDate))
                    .col(boolean(Vehicles::Imported).default(false))
                    .col(
                        timestamp_with_time_zone(Vehicles::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Vehicles::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Vehicles::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicles_model_id")
                            .from(Vehicles::Table, Vehicles::ModelId)
                            .to(Models::Table, Models::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicles_user_id")
                            .from(Vehicles::Table, Vehicles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicles_customer_id")
                            .from(Vehicles::Table, Vehicles::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_created_at")
                    .table(Vehicles::Table)
                    .col(Vehicles::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_vehicles_created_at")
                    .table(Vehicles::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Vehicles {
    Table,
    Id,
    ModelId,
    UserId,
    CustomerId,
    Year,
    Vin,
    Street,
    City,
    State,
    Country,
    Zipcode,
    Status,
    Location,
    AssignedDate,
    Imported,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
