pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_make_table;
mod m20260301_000002_create_model_table;
mod m20260301_000003_create_user_table;
mod m20260301_000004_create_customer_table;
mod m20260301_000005_create_vehicle_table;
mod m20260301_000006_create_vehicle_image_table;
mod m20260301_000007_create_favorite_table;
mod m20260301_000008_create_document_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_make_table::Migration),
            Box::new(m20260301_000002_create_model_table::Migration),
            Box::new(m20260301_000003_create_user_table::Migration),
            Box::new(m20260301_000004_create_customer_table::Migration),
            Box::new(m20260301_000005_create_vehicle_table::Migration),
            Box::new(m20260301_000006_create_vehicle_image_table::Migration),
            Box::new(m20260301_000007_create_favorite_table::Migration),
            Box::new(m20260301_000008_create_document_table::Migration),
        ]
    }
}
