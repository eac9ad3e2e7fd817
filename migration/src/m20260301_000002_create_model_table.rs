use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_make_table::Make;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Models::Table)
                    .if_not_exists()
                    .col(pk_auto(Models::Id))
                    .col(string(Models::Name))
                    .col(integer(Models::MakeId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_models_make_id")
                            .from(Models::Table, Models::MakeId)
                            .to(Make::Table, Make::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_models_make_id_name")
                            .col(Models::MakeId)
                            .col(Models::Name),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Models::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Models {
    Table,
    Id,
    Name,
    MakeId,
}
