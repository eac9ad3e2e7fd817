//! Model factory for creating test vehicle models.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating models that belong to a make.
pub struct VehicleModelFactory<'a> {
    db: &'a DatabaseConnection,
    make_id: i32,
    name: String,
}

impl<'a> VehicleModelFactory<'a> {
    /// Creates a new factory for the given make. Default name: `"Model {id}"`.
    pub fn new(db: &'a DatabaseConnection, make_id: i32) -> Self {
        Self {
            db,
            make_id,
            name: format!("Model {}", next_id()),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub async fn build(self) -> Result<entity::vehicle_model::Model, DbErr> {
        entity::vehicle_model::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(self.name),
            make_id: ActiveValue::Set(self.make_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a model with a unique default name under the given make.
pub async fn create_vehicle_model(
    db: &DatabaseConnection,
    make_id: i32,
) -> Result<entity::vehicle_model::Model, DbErr> {
    VehicleModelFactory::new(db, make_id).build().await
}
