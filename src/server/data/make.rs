//! Make catalog repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{data::filter::equals_ci, model::make::Make};

/// Repository for makes.
///
/// Generic over the connection so VIN registration can run inside a transaction.
pub struct MakeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MakeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets all makes ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Make>, DbErr> {
        let entities = entity::prelude::Make::find()
            .order_by_asc(entity::make::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Make::from_entity).collect())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Make>, DbErr> {
        let entity = entity::prelude::Make::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Make::from_entity))
    }

    /// Finds a make by name ignoring case.
    pub async fn find_by_name_ci(&self, name: &str) -> Result<Option<Make>, DbErr> {
        let entity = entity::prelude::Make::find()
            .filter(equals_ci(entity::make::Column::Name, name))
            .one(self.db)
            .await?;

        Ok(entity.map(Make::from_entity))
    }

    /// Gets the makes with the given ids, in no particular order.
    pub async fn find_by_ids(&self, ids: Vec<i32>) -> Result<Vec<Make>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Make::find()
            .filter(entity::make::Column::Id.is_in(ids))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Make::from_entity).collect())
    }

    /// Inserts a make with an already normalized name.
    pub async fn create(&self, name: String) -> Result<Make, DbErr> {
        let entity = entity::make::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
        }
        .insert(self.db)
        .await?;

        Ok(Make::from_entity(entity))
    }
}
