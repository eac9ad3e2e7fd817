use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::server::model::vehicle::VehicleImage;

pub struct VehicleImageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VehicleImageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores the URL of an uploaded image for a vehicle.
    pub async fn create(&self, vehicle_id: Uuid, image_url: String) -> Result<VehicleImage, DbErr> {
        let now = Utc::now();

        let entity = entity::vehicle_image::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            vehicle_id: ActiveValue::Set(vehicle_id),
            image_url: ActiveValue::Set(image_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(VehicleImage::from_entity(entity))
    }

    /// Gets the images of several vehicles at once, oldest first.
    pub async fn get_by_vehicle_ids(&self, vehicle_ids: Vec<Uuid>) -> Result<Vec<VehicleImage>, DbErr> {
        if vehicle_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::VehicleImage::find()
            .filter(entity::vehicle_image::Column::VehicleId.is_in(vehicle_ids))
            .order_by_asc(entity::vehicle_image::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(VehicleImage::from_entity).collect())
    }

    /// Gets the listed images, restricted to those belonging to `vehicle_id`.
    pub async fn get_for_vehicle(
        &self,
        vehicle_id: Uuid,
        image_ids: Vec<Uuid>,
    ) -> Result<Vec<VehicleImage>, DbErr> {
        if image_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::VehicleImage::find()
            .filter(entity::vehicle_image::Column::VehicleId.eq(vehicle_id))
            .filter(entity::vehicle_image::Column::Id.is_in(image_ids))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(VehicleImage::from_entity).collect())
    }

    pub async fn delete_by_ids(&self, ids: Vec<Uuid>) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::VehicleImage::delete_many()
            .filter(entity::vehicle_image::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_by_vehicle(&self, vehicle_id: Uuid) -> Result<u64, DbErr> {
        let result = entity::prelude::VehicleImage::delete_many()
            .filter(entity::vehicle_image::Column::VehicleId.eq(vehicle_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
