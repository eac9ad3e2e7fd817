//! Customer factory for creating test customer entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test customers.
///
/// Defaults:
/// - email: `"customer{id}@example.com"`
/// - first_name / last_name: `"Customer"` / `"{id}"`
/// - phone_number: `"+37477123456"`
pub struct CustomerFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    first_name: String,
    last_name: String,
    phone_number: String,
    deleted_at: Option<DateTime<Utc>>,
}

impl<'a> CustomerFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            email: format!("customer{}@example.com", id),
            first_name: "Customer".to_string(),
            last_name: id.to_string(),
            phone_number: "+37477123456".to_string(),
            deleted_at: None,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    /// Marks the customer as soft-deleted.
    pub fn deleted(mut self) -> Self {
        self.deleted_at = Some(Utc::now());
        self
    }

    pub async fn build(self) -> Result<entity::customer::Model, DbErr> {
        let now = Utc::now();
        entity::customer::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            email: ActiveValue::Set(self.email),
            first_name: ActiveValue::Set(self.first_name),
            last_name: ActiveValue::Set(self.last_name),
            phone_number: ActiveValue::Set(self.phone_number),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(self.deleted_at),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_customer(db: &DatabaseConnection) -> Result<entity::customer::Model, DbErr> {
    CustomerFactory::new(db).build().await
}
