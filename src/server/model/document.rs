//! Document attachment domain models.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::DocumentCategory;
use uuid::Uuid;

use crate::{
    model::document::DocumentDto,
    server::{error::AppError, model::upload::UploadedFile},
};

/// Stored file attached to a customer, a vehicle, or both.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    /// Original file name.
    pub name: String,
    pub category: DocumentCategory,
    pub customer_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub file_url: String,
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn from_entity(entity: entity::document::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            category: entity.category,
            customer_id: entity.customer_id,
            vehicle_id: entity.vehicle_id,
            file_url: entity.file_url,
            mime_type: entity.mime_type,
            size: entity.size,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> DocumentDto {
        DocumentDto {
            id: self.id,
            name: self.name,
            category: category_name(self.category).to_string(),
            customer_id: self.customer_id,
            vehicle_id: self.vehicle_id,
            file_url: self.file_url,
            mime_type: self.mime_type,
            size: self.size,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

pub fn category_name(category: DocumentCategory) -> &'static str {
    match category {
        DocumentCategory::Contract => "contract",
        DocumentCategory::Insurance => "insurance",
        DocumentCategory::VehicleRegistration => "vehicle_registration",
        DocumentCategory::Identification => "identification",
        DocumentCategory::Maintenance => "maintenance",
        DocumentCategory::Other => "other",
    }
}

/// Parses a category name; a missing or blank value means `other`.
///
/// # Returns
/// - `Ok(DocumentCategory)` - Known category
/// - `Err(AppError::BadRequest)` - Value is not one of the six categories
pub fn parse_category(value: Option<&str>) -> Result<DocumentCategory, AppError> {
    let value = value.map(str::trim).unwrap_or_default();
    match value {
        "" | "other" => Ok(DocumentCategory::Other),
        "contract" => Ok(DocumentCategory::Contract),
        "insurance" => Ok(DocumentCategory::Insurance),
        "vehicle_registration" => Ok(DocumentCategory::VehicleRegistration),
        "identification" => Ok(DocumentCategory::Identification),
        "maintenance" => Ok(DocumentCategory::Maintenance),
        _ => Err(AppError::BadRequest(format!(
            "Invalid document category: {}",
            value
        ))),
    }
}

/// Parameters for storing an uploaded document.
#[derive(Debug, Clone)]
pub struct UploadDocumentParams {
    pub file: UploadedFile,
    pub category: DocumentCategory,
    pub customer_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
}

impl UploadDocumentParams {
    /// Storage folder: `customers/<customer id>` or `customers/general`.
    pub fn folder(&self) -> String {
        match self.customer_id {
            Some(id) => format!("customers/{}", id),
            None => "customers/general".to_string(),
        }
    }
}

/// Document row to insert once its file is stored.
#[derive(Debug, Clone)]
pub struct CreateDocumentParams {
    pub name: String,
    pub category: DocumentCategory,
    pub customer_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub file_url: String,
    pub mime_type: String,
    pub size: i64,
}
