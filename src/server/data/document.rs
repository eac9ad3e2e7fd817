//! Document repository. Documents are soft-deleted.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::server::model::document::{CreateDocumentParams, Document};

/// Repository for documents, generic over the connection so vehicle assignment can
/// attach documents inside its transaction.
pub struct DocumentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DocumentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateDocumentParams) -> Result<Document, DbErr> {
        let now = Utc::now();

        let entity = entity::document::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(params.name),
            category: ActiveValue::Set(params.category),
            customer_id: ActiveValue::Set(params.customer_id),
            vehicle_id: ActiveValue::Set(params.vehicle_id),
            file_url: ActiveValue::Set(params.file_url),
            mime_type: ActiveValue::Set(params.mime_type),
            size: ActiveValue::Set(params.size),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ok(Document::from_entity(entity))
    }

    /// Gets a customer's non-deleted documents, newest first.
    pub async fn get_by_customer(&self, customer_id: Uuid) -> Result<Vec<Document>, DbErr> {
        let entities = entity::prelude::Document::find()
            .filter(entity::document::Column::CustomerId.eq(customer_id))
            .filter(entity::document::Column::DeletedAt.is_null())
            .order_by_desc(entity::document::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Document::from_entity).collect())
    }

    /// Gets a vehicle's non-deleted documents, newest first.
    pub async fn get_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<Document>, DbErr> {
        let entities = entity::prelude::Document::find()
            .filter(entity::document::Column::VehicleId.eq(vehicle_id))
            .filter(entity::document::Column::DeletedAt.is_null())
            .order_by_desc(entity::document::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Document::from_entity).collect())
    }

    /// Marks a document as deleted.
    ///
    /// # Returns
    /// - `Ok(true)` - A non-deleted document was marked deleted
    /// - `Ok(false)` - No such document, or it was already deleted
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let now = Utc::now();

        let result = entity::prelude::Document::update_many()
            .filter(entity::document::Column::Id.eq(id))
            .filter(entity::document::Column::DeletedAt.is_null())
            .col_expr(
                entity::document::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(Some(now)),
            )
            .col_expr(
                entity::document::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
