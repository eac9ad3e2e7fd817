//! Vehicle model catalog repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{data::filter::equals_ci, model::make::VehicleModel};

pub struct VehicleModelRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VehicleModelRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<VehicleModel>, DbErr> {
        let entity = entity::prelude::VehicleModel::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(VehicleModel::from_entity))
    }

    /// Gets every model of a make, ordered by name.
    pub async fn get_by_make(&self, make_id: i32) -> Result<Vec<VehicleModel>, DbErr> {
        let entities = entity::prelude::VehicleModel::find()
            .filter(entity::vehicle_model::Column::MakeId.eq(make_id))
            .order_by_asc(entity::vehicle_model::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(VehicleModel::from_entity).collect())
    }

    /// Finds a model of a make by name ignoring case.
    pub async fn find_by_name_ci(
        &self,
        make_id: i32,
        name: &str,
    ) -> Result<Option<VehicleModel>, DbErr> {
        let entity = entity::prelude::VehicleModel::find()
            .filter(entity::vehicle_model::Column::MakeId.eq(make_id))
            .filter(equals_ci(entity::vehicle_model::Column::Name, name))
            .one(self.db)
            .await?;

        Ok(entity.map(VehicleModel::from_entity))
    }

    /// Gets the models with the given ids, in no particular order.
    pub async fn find_by_ids(&self, ids: Vec<i32>) -> Result<Vec<VehicleModel>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::VehicleModel::find()
            .filter(entity::vehicle_model::Column::Id.is_in(ids))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(VehicleModel::from_entity).collect())
    }

    /// Inserts a model with an already normalized name.
    pub async fn create(&self, make_id: i32, name: String) -> Result<VehicleModel, DbErr> {
        let entity = entity::vehicle_model::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
            make_id: ActiveValue::Set(make_id),
        }
        .insert(self.db)
        .await?;

        Ok(VehicleModel::from_entity(entity))
    }
}
