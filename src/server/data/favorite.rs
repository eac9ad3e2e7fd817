use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect,
};
use std::collections::HashSet;
use uuid::Uuid;

/// Repository for the user ↔ vehicle favorites join table.
pub struct FavoriteRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FavoriteRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn exists(&self, user_id: Uuid, vehicle_id: Uuid) -> Result<bool, DbErr> {
        let count = entity::prelude::Favorite::find()
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .filter(entity::favorite::Column::VehicleId.eq(vehicle_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn create(&self, user_id: Uuid, vehicle_id: Uuid) -> Result<(), DbErr> {
        entity::favorite::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            vehicle_id: ActiveValue::Set(vehicle_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Removes a favorite.
    ///
    /// # Returns
    /// - `Ok(true)` - The favorite existed and was removed
    /// - `Ok(false)` - The vehicle was not a favorite of the user
    pub async fn delete(&self, user_id: Uuid, vehicle_id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Favorite::delete_many()
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .filter(entity::favorite::Column::VehicleId.eq(vehicle_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Returns which of `vehicle_ids` the user has favorited.
    pub async fn favorited_among(
        &self,
        user_id: Uuid,
        vehicle_ids: Vec<Uuid>,
    ) -> Result<HashSet<Uuid>, DbErr> {
        if vehicle_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids: Vec<Uuid> = entity::prelude::Favorite::find()
            .select_only()
            .column(entity::favorite::Column::VehicleId)
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .filter(entity::favorite::Column::VehicleId.is_in(vehicle_ids))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(ids.into_iter().collect())
    }
}
