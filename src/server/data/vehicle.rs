//! Vehicle repository.
//!
//! Vehicles are soft-deleted and every read path skips rows with `deleted_at` set.
//! The filtered queries join the model and make tables so search and make filters
//! can match catalog names; related rows are loaded separately by the service layer.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use entity::sea_orm_active_enums::VehicleStatus;
use uuid::Uuid;

use crate::server::{
    data::filter::{contains_ci, equals_ci},
    model::vehicle::{MapPoint, Vehicle, VehicleFilter, VehicleParams},
};

/// Repository for vehicles, generic over the connection so assignment and bulk
/// import can run inside a transaction.
pub struct VehicleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VehicleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a non-deleted vehicle by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, DbErr> {
        let entity = entity::prelude::Vehicle::find_by_id(id)
            .filter(entity::vehicle::Column::DeletedAt.is_null())
            .one(self.db)
            .await?;

        Ok(entity.map(Vehicle::from_entity))
    }

    /// Checks whether any vehicle, including soft-deleted ones, uses `vin`.
    ///
    /// # Arguments
    /// - `vin` - VIN to look up
    /// - `exclude_id` - Vehicle to ignore, used when updating
    pub async fn vin_exists(&self, vin: &str, exclude_id: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Vehicle::find().filter(entity::vehicle::Column::Vin.eq(vin));

        if let Some(id) = exclude_id {
            query = query.filter(entity::vehicle::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Inserts a vehicle registered by `user_id`.
    ///
    /// # Arguments
    /// - `user_id` - Creator of the vehicle
    /// - `params` - Validated vehicle fields
    /// - `imported` - Whether the row comes from a CSV import
    pub async fn create(
        &self,
        user_id: Uuid,
        params: VehicleParams,
        imported: bool,
    ) -> Result<Vehicle, DbErr> {
        let now = Utc::now();

        let entity = entity::vehicle::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            model_id: ActiveValue::Set(params.model_id),
            user_id: ActiveValue::Set(user_id),
            customer_id: ActiveValue::Set(None),
            year: ActiveValue::Set(params.year),
            vin: ActiveValue::Set(params.vin),
            street: ActiveValue::Set(params.street),
            city: ActiveValue::Set(params.city),
            state: ActiveValue::Set(params.state),
            country: ActiveValue::Set(params.country),
            zipcode: ActiveValue::Set(params.zipcode),
            status: ActiveValue::Set(params.status),
            location: ActiveValue::Set(params.location),
            assigned_date: ActiveValue::Set(None),
            imported: ActiveValue::Set(imported),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ok(Vehicle::from_entity(entity))
    }

    /// Overwrites the editable fields of a non-deleted vehicle.
    ///
    /// # Returns
    /// - `Ok(Some(Vehicle))` - The updated vehicle
    /// - `Ok(None)` - No such vehicle
    pub async fn update(&self, id: Uuid, params: VehicleParams) -> Result<Option<Vehicle>, DbErr> {
        let Some(entity) = entity::prelude::Vehicle::find_by_id(id)
            .filter(entity::vehicle::Column::DeletedAt.is_null())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::vehicle::ActiveModel = entity.into();
        active.model_id = ActiveValue::Set(params.model_id);
        active.year = ActiveValue::Set(params.year);
        active.vin = ActiveValue::Set(params.vin);
        active.street = ActiveValue::Set(params.street);
        active.city = ActiveValue::Set(params.city);
        active.state = ActiveValue::Set(params.state);
        active.country = ActiveValue::Set(params.country);
        active.zipcode = ActiveValue::Set(params.zipcode);
        active.status = ActiveValue::Set(params.status);
        active.location = ActiveValue::Set(params.location);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Vehicle::from_entity(entity)))
    }

    /// Marks a vehicle as deleted.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), DbErr> {
        let now = Utc::now();

        entity::prelude::Vehicle::update_many()
            .filter(entity::vehicle::Column::Id.eq(id))
            .col_expr(
                entity::vehicle::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(Some(now)),
            )
            .col_expr(
                entity::vehicle::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Records the sale of a vehicle to a customer.
    ///
    /// Sets the customer, `assigned_date = now` and `status = sold`.
    pub async fn assign_customer(
        &self,
        id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<Vehicle>, DbErr> {
        let Some(entity) = entity::prelude::Vehicle::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let mut active: entity::vehicle::ActiveModel = entity.into();
        active.customer_id = ActiveValue::Set(Some(customer_id));
        active.assigned_date = ActiveValue::Set(Some(now));
        active.status = ActiveValue::Set(VehicleStatus::Sold);
        active.updated_at = ActiveValue::Set(now);

        let entity = active.update(self.db).await?;

        Ok(Some(Vehicle::from_entity(entity)))
    }

    /// Gets one page of vehicles matching `filter`, newest first.
    ///
    /// # Arguments
    /// - `filter` - Search, make, model and availability filters
    /// - `page` - 1-based page number
    /// - `limit` - Page size
    ///
    /// # Returns
    /// - `Ok((vehicles, total))` - Vehicles for the page and total matching count
    pub async fn get_paginated(
        &self,
        filter: &VehicleFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Vehicle>, u64), DbErr> {
        let paginator = Self::filtered(filter)
            .order_by_desc(entity::vehicle::Column::CreatedAt)
            .paginate(self.db, limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((entities.into_iter().map(Vehicle::from_entity).collect(), total))
    }

    /// Gets the id and coordinates of every vehicle matching `filter`.
    pub async fn get_map_points(&self, filter: &VehicleFilter) -> Result<Vec<MapPoint>, DbErr> {
        let rows: Vec<(Uuid, String)> = Self::filtered(filter)
            .select_only()
            .column(entity::vehicle::Column::Id)
            .column(entity::vehicle::Column::Location)
            .order_by_desc(entity::vehicle::Column::CreatedAt)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, location)| MapPoint { id, location })
            .collect())
    }

    /// Gets every vehicle matching `filter`, newest first.
    ///
    /// # Arguments
    /// - `filter` - Search, make, model and availability filters
    /// - `favorites_of` - Restrict to this user's favorites
    pub async fn get_filtered(
        &self,
        filter: &VehicleFilter,
        favorites_of: Option<Uuid>,
    ) -> Result<Vec<Vehicle>, DbErr> {
        let mut query = Self::filtered(filter);

        if let Some(user_id) = favorites_of {
            query = query
                .join(JoinType::InnerJoin, entity::vehicle::Relation::Favorite.def())
                .filter(entity::favorite::Column::UserId.eq(user_id));
        }

        let entities = query
            .order_by_desc(entity::vehicle::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Vehicle::from_entity).collect())
    }

    /// Gets a user's non-deleted favorite vehicles, most recently favorited first.
    pub async fn get_favorites_of(&self, user_id: Uuid) -> Result<Vec<Vehicle>, DbErr> {
        let entities = entity::prelude::Vehicle::find()
            .join(JoinType::InnerJoin, entity::vehicle::Relation::Favorite.def())
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .filter(entity::vehicle::Column::DeletedAt.is_null())
            .order_by_desc(entity::favorite::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Vehicle::from_entity).collect())
    }

    /// Counts non-deleted vehicles, optionally only those with `status`.
    pub async fn count_active(&self, status: Option<VehicleStatus>) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Vehicle::find()
            .filter(entity::vehicle::Column::DeletedAt.is_null());

        if let Some(status) = status {
            query = query.filter(entity::vehicle::Column::Status.eq(status));
        }

        query.count(self.db).await
    }

    /// Base query for non-deleted vehicles joined with their model and make, with
    /// `filter` applied.
    fn filtered(filter: &VehicleFilter) -> Select<entity::vehicle::Entity> {
        let mut query = entity::prelude::Vehicle::find()
            .join(
                JoinType::InnerJoin,
                entity::vehicle::Relation::VehicleModel.def(),
            )
            .join(JoinType::InnerJoin, entity::vehicle_model::Relation::Make.def())
            .filter(entity::vehicle::Column::DeletedAt.is_null());

        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(entity::vehicle_model::Column::Name, search))
                    .add(contains_ci(entity::make::Column::Name, search))
                    .add(contains_ci(entity::vehicle::Column::Year, search))
                    .add(contains_ci(entity::vehicle::Column::Vin, search)),
            );
        }

        if let Some(make) = &filter.make {
            query = query.filter(equals_ci(entity::make::Column::Name, make));
        }

        if !filter.models.is_empty() {
            query = query.filter(entity::vehicle_model::Column::Name.is_in(filter.models.clone()));
        }

        if let Some(availability) = &filter.availability {
            query = query.filter(equals_ci(entity::vehicle::Column::Status, availability));
        }

        query
    }
}
