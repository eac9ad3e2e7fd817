use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::server::{
    data::{favorite::FavoriteRepository, vehicle::VehicleRepository},
    error::AppError,
    model::vehicle::VehicleDetail,
    service::{make::is_unique_violation, vehicle::load_details},
};

pub struct FavoriteService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FavoriteService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a vehicle to the user's favorites.
    ///
    /// # Returns
    /// - `Ok(())` - Favorite recorded
    /// - `Err(AppError::NotFound)` - No such vehicle
    /// - `Err(AppError::Conflict)` - Already a favorite
    pub async fn add(&self, user_id: Uuid, vehicle_id: Uuid) -> Result<(), AppError> {
        self.ensure_vehicle(vehicle_id).await?;

        let repo = FavoriteRepository::new(self.db);
        if repo.exists(user_id, vehicle_id).await? {
            return Err(already_favorite());
        }

        // A concurrent add can still win the insert.
        repo.create(user_id, vehicle_id)
            .await
            .map_err(insert_error)?;

        Ok(())
    }

    /// Removes a vehicle from the user's favorites. Removing a vehicle that is not a
    /// favorite succeeds.
    pub async fn remove(&self, user_id: Uuid, vehicle_id: Uuid) -> Result<(), AppError> {
        self.ensure_vehicle(vehicle_id).await?;

        FavoriteRepository::new(self.db)
            .delete(user_id, vehicle_id)
            .await?;

        Ok(())
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<VehicleDetail>, AppError> {
        let vehicles = VehicleRepository::new(self.db)
            .get_favorites_of(user_id)
            .await?;

        load_details(self.db, user_id, vehicles).await
    }

    async fn ensure_vehicle(&self, vehicle_id: Uuid) -> Result<(), AppError> {
        VehicleRepository::new(self.db)
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        Ok(())
    }
}

fn already_favorite() -> AppError {
    AppError::Conflict("Vehicle is already in favorites".to_string())
}

fn insert_error(err: DbErr) -> AppError {
    if is_unique_violation(&err) {
        already_favorite()
    } else {
        err.into()
    }
}
