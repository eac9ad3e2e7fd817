//! Make factory for creating test make entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test makes.
pub struct MakeFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
}

impl<'a> MakeFactory<'a> {
    /// Creates a new MakeFactory. Default name: `"Make {id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Make {}", next_id()),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub async fn build(self) -> Result<entity::make::Model, DbErr> {
        entity::make::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(self.name),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a make with a unique default name.
pub async fn create_make(db: &DatabaseConnection) -> Result<entity::make::Model, DbErr> {
    MakeFactory::new(db).build().await
}
