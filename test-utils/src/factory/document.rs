//! Document factory for creating test document entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::DocumentCategory;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating documents, optionally linked to a customer and vehicle.
///
/// Defaults:
/// - name: `"document{id}.pdf"`
/// - category: `DocumentCategory::Other`
/// - mime_type: `"application/pdf"`, size `1024`
pub struct DocumentFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    category: DocumentCategory,
    customer_id: Option<Uuid>,
    vehicle_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl<'a> DocumentFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("document{}.pdf", next_id()),
            category: DocumentCategory::Other,
            customer_id: None,
            vehicle_id: None,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    pub fn category(mut self, category: DocumentCategory) -> Self {
        self.category = category;
        self
    }

    pub fn customer_id(mut self, customer_id: Option<Uuid>) -> Self {
        self.customer_id = customer_id;
        self
    }

    pub fn vehicle_id(mut self, vehicle_id: Option<Uuid>) -> Self {
        self.vehicle_id = vehicle_id;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.deleted_at = Some(Utc::now());
        self
    }

    pub async fn build(self) -> Result<entity::document::Model, DbErr> {
        let file_url = format!(
            "https://res.cloudinary.com/demo/raw/upload/v1/customers/general/{}",
            self.name
        );
        entity::document::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(self.name),
            category: ActiveValue::Set(self.category),
            customer_id: ActiveValue::Set(self.customer_id),
            vehicle_id: ActiveValue::Set(self.vehicle_id),
            file_url: ActiveValue::Set(file_url),
            mime_type: ActiveValue::Set("application/pdf".to_string()),
            size: ActiveValue::Set(1024),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            deleted_at: ActiveValue::Set(self.deleted_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unlinked document in the `other` category.
pub async fn create_document(db: &DatabaseConnection) -> Result<entity::document::Model, DbErr> {
    DocumentFactory::new(db).build().await
}
