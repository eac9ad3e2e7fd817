//! Customer repository.
//!
//! Customers are soft-deleted: every read skips rows with `deleted_at` set, while
//! the upsert by email revives a deleted row instead of colliding with its unique email.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    data::filter::{contains_ci, equals_ci},
    model::customer::{Customer, CustomerParams},
};

/// Repository for customers, generic over the connection so vehicle assignment can
/// run it inside a transaction.
pub struct CustomerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CustomerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DbErr> {
        let entity = entity::prelude::Customer::find_by_id(id)
            .filter(entity::customer::Column::DeletedAt.is_null())
            .one(self.db)
            .await?;

        Ok(entity.map(Customer::from_entity))
    }

    /// Gets the non-deleted customers with the given ids, in no particular order.
    pub async fn find_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<Customer>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Customer::find()
            .filter(entity::customer::Column::Id.is_in(ids))
            .filter(entity::customer::Column::DeletedAt.is_null())
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Customer::from_entity).collect())
    }

    /// Creates a customer, or updates the one already holding `params.email`.
    ///
    /// A soft-deleted customer with the same email is restored.
    ///
    /// # Returns
    /// - `Ok((customer, true))` - A new customer was inserted
    /// - `Ok((customer, false))` - An existing customer was updated
    /// - `Err(DbErr)` - Database error
    pub async fn upsert_by_email(&self, params: CustomerParams) -> Result<(Customer, bool), DbErr> {
        let now = Utc::now();

        let existing = entity::prelude::Customer::find()
            .filter(equals_ci(entity::customer::Column::Email, &params.email))
            .one(self.db)
            .await?;

        if let Some(existing) = existing {
            let mut active: entity::customer::ActiveModel = existing.into();
            active.first_name = ActiveValue::Set(params.first_name);
            active.last_name = ActiveValue::Set(params.last_name);
            active.phone_number = ActiveValue::Set(params.phone_number);
            active.deleted_at = ActiveValue::Set(None);
            active.updated_at = ActiveValue::Set(now);

            let entity = active.update(self.db).await?;
            return Ok((Customer::from_entity(entity), false));
        }

        let entity = entity::customer::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            email: ActiveValue::Set(params.email),
            first_name: ActiveValue::Set(params.first_name),
            last_name: ActiveValue::Set(params.last_name),
            phone_number: ActiveValue::Set(params.phone_number),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ok((Customer::from_entity(entity), true))
    }

    /// Gets customers whose email contains `fragment`, ignoring case.
    pub async fn search_by_email(&self, fragment: &str) -> Result<Vec<Customer>, DbErr> {
        let entities = entity::prelude::Customer::find()
            .filter(contains_ci(entity::customer::Column::Email, fragment))
            .filter(entity::customer::Column::DeletedAt.is_null())
            .order_by_asc(entity::customer::Column::Email)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Customer::from_entity).collect())
    }

    /// Gets every non-deleted customer, newest first.
    pub async fn get_all(&self) -> Result<Vec<Customer>, DbErr> {
        let entities = entity::prelude::Customer::find()
            .filter(entity::customer::Column::DeletedAt.is_null())
            .order_by_desc(entity::customer::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Customer::from_entity).collect())
    }

    pub async fn count_active(&self) -> Result<u64, DbErr> {
        entity::prelude::Customer::find()
            .filter(entity::customer::Column::DeletedAt.is_null())
            .count(self.db)
            .await
    }
}
