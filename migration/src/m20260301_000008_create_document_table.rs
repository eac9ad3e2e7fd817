use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000004_create_customer_table::Customers,
    m20260301_000005_create_vehicle_table::Vehicles,
};

const INDEXES: [(&str, Documents); 3] = [
    ("idx_documents_customer_id", Documents::CustomerId),
    ("idx_documents_vehicle_id", Documents::VehicleId),
    ("idx_documents_category", Documents::Category),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(pk_uuid(Documents::Id))
                    .col(string(Documents::Name))
                    .col(string_len(Documents::Category, 32).default("other"))
                    .col(uuid_null(Documents::CustomerId))
                    .col(uuid_null(Documents::VehicleId))
                    .col(text(Documents::FileUrl))
                    .col(string(Documents::MimeType))
                    .col(big_integer(Documents::Size))
                    .col(
                        timestamp_with_time_zone(Documents::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Documents::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Documents::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_customer_id")
                            .from(Documents::Table, Documents::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_vehicle_id")
                            .from(Documents::Table, Documents::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Documents::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in INDEXES {
            manager
                .drop_index(Index::drop().name(name).table(Documents::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden, Clone, Copy)]
pub enum Documents {
    Table,
    Id,
    Name,
    Category,
    CustomerId,
    VehicleId,
    FileUrl,
    MimeType,
    Size,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
