//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing back-office accounts. It
//! handles invitations, activation, password and profile updates, forced logout and
//! paginated listing, converting entity models to domain models at the boundary.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    data::filter::{contains_ci, equals_ci},
    model::user::{GetUsersParams, NewUserParams, UpdateProfileParams, User},
};

/// Repository providing database operations for user management.
///
/// Generic over the connection so an invitation can be inserted inside a transaction.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new account.
    ///
    /// # Arguments
    /// - `params` - Email, password hash, role, names and verification state
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including a duplicate email
    pub async fn create(&self, params: NewUserParams) -> Result<User, DbErr> {
        let now = Utc::now();

        let entity = entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            role: ActiveValue::Set(params.role),
            first_name: ActiveValue::Set(params.first_name),
            last_name: ActiveValue::Set(params.last_name),
            phone_number: ActiveValue::Set(params.phone_number),
            is_verified: ActiveValue::Set(params.is_verified),
            force_logout_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by email, ignoring case.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that email
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(equals_ci(entity::user::Column::Email, email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Checks whether any account exists. Used to seed the first super admin.
    pub async fn any_exists(&self) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find().count(self.db).await?;

        Ok(count > 0)
    }

    /// Gets users with pagination, newest first, excluding the caller.
    ///
    /// The optional search fragment is matched case-insensitively against email and role.
    ///
    /// # Arguments
    /// - `params` - Caller id, 1-based page, page size and optional search
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the requested page and total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(&self, params: &GetUsersParams) -> Result<(Vec<User>, u64), DbErr> {
        let mut query = entity::prelude::User::find()
            .filter(entity::user::Column::Id.ne(params.exclude_user_id));

        if let Some(search) = &params.search {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(entity::user::Column::Email, search))
                    .add(contains_ci(entity::user::Column::Role, search)),
            );
        }

        let paginator = query
            .order_by_desc(entity::user::Column::CreatedAt)
            .paginate(self.db, params.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((entities.into_iter().map(User::from_entity).collect(), total))
    }

    /// Replaces the password hash of a user.
    pub async fn update_password(&self, id: Uuid, password_hash: String) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .col_expr(
                entity::user::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Completes an invitation: stores the chosen name and password and marks the
    /// account verified.
    pub async fn activate(
        &self,
        id: Uuid,
        first_name: String,
        password_hash: String,
    ) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::FirstName,
                sea_orm::sea_query::Expr::value(first_name),
            )
            .col_expr(
                entity::user::Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .col_expr(
                entity::user::Column::IsVerified,
                sea_orm::sea_query::Expr::value(true),
            )
            .col_expr(
                entity::user::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Applies the present profile fields of `params`.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The updated user
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_profile(
        &self,
        id: Uuid,
        params: UpdateProfileParams,
    ) -> Result<Option<User>, DbErr> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = entity.into();
        if let Some(first_name) = params.first_name {
            active.first_name = ActiveValue::Set(Some(first_name));
        }
        if let Some(last_name) = params.last_name {
            active.last_name = ActiveValue::Set(Some(last_name));
        }
        if let Some(phone_number) = params.phone_number {
            active.phone_number = ActiveValue::Set(Some(phone_number));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(User::from_entity(entity)))
    }

    /// Invalidates every access token issued to the user before `at`.
    pub async fn set_force_logout(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::ForceLogoutAt,
                sea_orm::sea_query::Expr::value(Some(at)),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes a user and, through cascading keys, the vehicles they registered.
    ///
    /// # Returns
    /// - `Ok(true)` - User deleted
    /// - `Ok(false)` - No user with that id
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
