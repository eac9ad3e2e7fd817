//! Document attachments for customers and vehicles.
//!
//! Files go to cloud storage under `customers/<customer id>` (or `customers/general`
//! when no customer is given); the row keeps the URL, MIME type and size.

use sea_orm::{ConnectionTrait, DatabaseConnection};
use uuid::Uuid;

use crate::server::{
    data::{customer::CustomerRepository, document::DocumentRepository, vehicle::VehicleRepository},
    error::AppError,
    model::document::{CreateDocumentParams, Document, UploadDocumentParams},
    service::storage::FileStorage,
};

pub struct DocumentService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn FileStorage,
}

impl<'a> DocumentService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn FileStorage) -> Self {
        Self { db, storage }
    }

    /// Stores an uploaded document and records it.
    ///
    /// # Returns
    /// - `Ok(Document)` - The stored document
    /// - `Err(AppError::NotFound)` - The referenced customer or vehicle does not exist
    /// - `Err(AppError::InternalErr(Storage))` - Upload rejected by storage
    pub async fn upload(&self, params: UploadDocumentParams) -> Result<Document, AppError> {
        if let Some(customer_id) = params.customer_id {
            CustomerRepository::new(self.db)
                .find_by_id(customer_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;
        }
        if let Some(vehicle_id) = params.vehicle_id {
            VehicleRepository::new(self.db)
                .find_by_id(vehicle_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
        }

        let document = store_document(self.storage, self.db, params).await?;

        tracing::info!(document_id = %document.id, "Document uploaded");

        Ok(document)
    }

    pub async fn get_by_customer(&self, customer_id: Uuid) -> Result<Vec<Document>, AppError> {
        Ok(DocumentRepository::new(self.db)
            .get_by_customer(customer_id)
            .await?)
    }

    pub async fn get_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<Document>, AppError> {
        Ok(DocumentRepository::new(self.db)
            .get_by_vehicle(vehicle_id)
            .await?)
    }

    /// Soft-deletes a document. The stored file is kept.
    ///
    /// # Returns
    /// - `Ok(())` - Document marked deleted
    /// - `Err(AppError::NotFound)` - No such document, or it was already deleted
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !DocumentRepository::new(self.db).soft_delete(id).await? {
            return Err(AppError::NotFound("Document not found".to_string()));
        }

        Ok(())
    }
}

/// Uploads the file of `params` and inserts its document row through `db`.
///
/// Generic over the connection so vehicle assignment can attach documents inside
/// its transaction.
pub(crate) async fn store_document<C: ConnectionTrait>(
    storage: &dyn FileStorage,
    db: &C,
    params: UploadDocumentParams,
) -> Result<Document, AppError> {
    let file_url = storage.upload(&params.folder(), &params.file).await?;

    let document = DocumentRepository::new(db)
        .create(CreateDocumentParams {
            name: params.file.file_name.clone(),
            category: params.category,
            customer_id: params.customer_id,
            vehicle_id: params.vehicle_id,
            file_url,
            mime_type: params.file.content_type.clone(),
            size: params.file.size(),
        })
        .await?;

    Ok(document)
}
