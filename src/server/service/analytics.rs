use entity::sea_orm_active_enums::VehicleStatus;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{customer::CustomerRepository, vehicle::VehicleRepository},
    error::AppError,
    model::analytics::AnalyticsSummary,
};

pub struct AnalyticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counts vehicles, customers and sold vehicles, ignoring deleted rows.
    pub async fn summary(&self) -> Result<AnalyticsSummary, AppError> {
        let vehicles = VehicleRepository::new(self.db);

        Ok(AnalyticsSummary {
            total_vehicles: vehicles.count_active(None).await?,
            total_customers: CustomerRepository::new(self.db).count_active().await?,
            vehicles_sold: vehicles.count_active(Some(VehicleStatus::Sold)).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{
        builder::TestBuilder,
        factory::{self, customer::CustomerFactory, vehicle::VehicleFactory},
    };

    /// Tests the dashboard counters.
    ///
    /// Expected: deleted vehicles and customers are not counted
    #[tokio::test]
    async fn test_summary_counts_active_rows() {
        let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await.unwrap();
        let (_, model) = factory::create_make_with_model(db).await.unwrap();

        VehicleFactory::new(db, model.id, user.id).build().await.unwrap();
        VehicleFactory::new(db, model.id, user.id)
            .status(VehicleStatus::Sold)
            .build()
            .await
            .unwrap();
        VehicleFactory::new(db, model.id, user.id)
            .status(VehicleStatus::Sold)
            .deleted()
            .build()
            .await
            .unwrap();
        factory::create_customer(db).await.unwrap();
        CustomerFactory::new(db).deleted().build().await.unwrap();

        let summary = AnalyticsService::new(db).summary().await.unwrap();

        assert_eq!(
            summary,
            AnalyticsSummary {
                total_vehicles: 2,
                total_customers: 1,
                vehicles_sold: 1,
            }
        );
    }
}
