//! Vehicle image factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating images attached to a vehicle.
///
/// Default url: `"https://res.cloudinary.com/demo/image/upload/v1/vehicles/img{id}.jpg"`.
pub struct VehicleImageFactory<'a> {
    db: &'a DatabaseConnection,
    vehicle_id: Uuid,
    image_url: String,
}

impl<'a> VehicleImageFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, vehicle_id: Uuid) -> Self {
        Self {
            db,
            vehicle_id,
            image_url: format!(
                "https://res.cloudinary.com/demo/image/upload/v1/vehicles/img{}.jpg",
                next_id()
            ),
        }
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub async fn build(self) -> Result<entity::vehicle_image::Model, DbErr> {
        let now = Utc::now();
        entity::vehicle_image::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            vehicle_id: ActiveValue::Set(self.vehicle_id),
            image_url: ActiveValue::Set(self.image_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_vehicle_image(
    db: &DatabaseConnection,
    vehicle_id: Uuid,
) -> Result<entity::vehicle_image::Model, DbErr> {
    VehicleImageFactory::new(db, vehicle_id).build().await
}
