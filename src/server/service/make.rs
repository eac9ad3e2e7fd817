//! Make and model catalog service.
//!
//! Names are normalized (lowercased, each word capitalized) before they are looked up
//! or stored, so "TOYOTA" and "toyota" resolve to the same make.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{make::MakeRepository, vehicle_model::VehicleModelRepository},
    error::AppError,
    model::make::{Make, VehicleModel},
    util::normalize::normalize_name,
};

pub struct MakeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MakeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<Make>, AppError> {
        Ok(MakeRepository::new(self.db).get_all().await?)
    }

    /// Gets a make by id.
    ///
    /// # Returns
    /// - `Ok(Make)` - The make
    /// - `Err(AppError::NotFound)` - No make with that id
    pub async fn get_by_id(&self, id: i32) -> Result<Make, AppError> {
        MakeRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Make not found".to_string()))
    }

    pub async fn get_models(&self, make_id: i32) -> Result<Vec<VehicleModel>, AppError> {
        Ok(VehicleModelRepository::new(self.db)
            .get_by_make(make_id)
            .await?)
    }

    /// Finds a make by name, creating it when it does not exist yet.
    ///
    /// # Arguments
    /// - `name` - Make name in any casing
    ///
    /// # Returns
    /// - `Ok(Make)` - Existing or newly created make
    /// - `Err(AppError::BadRequest)` - Name is blank
    pub async fn find_or_create_make(&self, name: &str) -> Result<Make, AppError> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(AppError::BadRequest("Make name is required".to_string()));
        }

        let repo = MakeRepository::new(self.db);
        if let Some(make) = repo.find_by_name_ci(&name).await? {
            return Ok(make);
        }

        match repo.create(name.clone()).await {
            Ok(make) => Ok(make),
            // Created concurrently by another request
            Err(err) if is_unique_violation(&err) => repo
                .find_by_name_ci(&name)
                .await?
                .ok_or_else(|| AppError::DbErr(err)),
            Err(err) => Err(err.into()),
        }
    }

    /// Finds a model of `make_id` by name, creating it when missing.
    ///
    /// # Returns
    /// - `Ok(VehicleModel)` - Existing or newly created model
    /// - `Err(AppError::BadRequest)` - Name is blank
    /// - `Err(AppError::NotFound)` - The make does not exist
    pub async fn find_or_create_model(
        &self,
        name: &str,
        make_id: i32,
    ) -> Result<VehicleModel, AppError> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(AppError::BadRequest(
                "Model name and make_id are required".to_string(),
            ));
        }

        self.get_by_id(make_id).await?;

        let repo = VehicleModelRepository::new(self.db);
        if let Some(model) = repo.find_by_name_ci(make_id, &name).await? {
            return Ok(model);
        }

        match repo.create(make_id, name.clone()).await {
            Ok(model) => Ok(model),
            Err(err) if is_unique_violation(&err) => repo
                .find_by_name_ci(make_id, &name)
                .await?
                .ok_or_else(|| AppError::DbErr(err)),
            Err(err) => Err(err.into()),
        }
    }
}

pub(crate) fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}
