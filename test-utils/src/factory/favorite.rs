//! Favorite factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Marks `vehicle_id` as a favorite of `user_id`.
pub async fn create_favorite(
    db: &DatabaseConnection,
    user_id: Uuid,
    vehicle_id: Uuid,
) -> Result<entity::favorite::Model, DbErr> {
    entity::favorite::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        vehicle_id: ActiveValue::Set(vehicle_id),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
