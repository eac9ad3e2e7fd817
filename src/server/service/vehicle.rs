//! Vehicle inventory: registration, listing, updates, image galleries and sales.

use std::collections::HashMap;

use entity::sea_orm_active_enums::DocumentCategory;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{
        customer::CustomerRepository, favorite::FavoriteRepository, make::MakeRepository,
        vehicle::VehicleRepository, vehicle_image::VehicleImageRepository,
        vehicle_model::VehicleModelRepository,
    },
    error::AppError,
    model::{
        document::UploadDocumentParams,
        upload::UploadedFile,
        vehicle::{
            AssignCustomerParams, AssignmentOutcome, GetVehiclesParams, MapPoint,
            PaginatedVehicles, Vehicle, VehicleDetail, VehicleFilter, VehicleParams,
        },
    },
    service::{
        document::store_document,
        make::is_unique_violation,
        storage::{extract_public_id, FileStorage},
    },
};

/// Cloud storage folder for vehicle images.
const IMAGE_FOLDER: &str = "vehicles";

pub struct VehicleService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn FileStorage,
}

impl<'a> VehicleService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn FileStorage) -> Self {
        Self { db, storage }
    }

    /// Registers a vehicle for `user_id`.
    ///
    /// # Returns
    /// - `Ok(Vehicle)` - The new vehicle, status as submitted
    /// - `Err(AppError::BadRequest)` - Unknown model or VIN already registered
    /// - `Err(AppError::Conflict)` - Model does not belong to the submitted make
    pub async fn create(&self, user_id: Uuid, params: VehicleParams) -> Result<Vehicle, AppError> {
        self.check_catalog(&params).await?;

        let repo = VehicleRepository::new(self.db);
        if repo.vin_exists(&params.vin, None).await? {
            return Err(vin_taken());
        }

        let vehicle = match repo.create(user_id, params, false).await {
            Ok(vehicle) => vehicle,
            Err(err) if is_unique_violation(&err) => return Err(vin_taken()),
            Err(err) => return Err(err.into()),
        };

        tracing::info!(vehicle_id = %vehicle.id, vin = %vehicle.vin, "Vehicle created");

        Ok(vehicle)
    }

    /// Gets one page of vehicles with their details.
    ///
    /// # Returns
    /// - `Ok(PaginatedVehicles)` - Page of vehicles, newest first
    /// - `Err(AppError::BadRequest)` - Model filter without a make
    pub async fn get_paginated(
        &self,
        params: GetVehiclesParams,
    ) -> Result<PaginatedVehicles, AppError> {
        params.filter.validate()?;

        let (vehicles, total) = VehicleRepository::new(self.db)
            .get_paginated(&params.filter, params.page, params.limit)
            .await?;

        let vehicles = load_details(self.db, params.user_id, vehicles).await?;

        Ok(PaginatedVehicles {
            vehicles,
            total,
            page: params.page,
            limit: params.limit,
            total_pages: total.div_ceil(params.limit.max(1)),
        })
    }

    /// Gets the coordinates of every vehicle matching `filter`.
    pub async fn get_map_points(&self, filter: VehicleFilter) -> Result<Vec<MapPoint>, AppError> {
        filter.validate()?;

        Ok(VehicleRepository::new(self.db)
            .get_map_points(&filter)
            .await?)
    }

    /// Gets one vehicle with its details.
    ///
    /// # Arguments
    /// - `user_id` - Caller, used for the favorite flag
    /// - `id` - Vehicle to load
    pub async fn get_by_id(&self, user_id: Uuid, id: Uuid) -> Result<VehicleDetail, AppError> {
        let vehicle = VehicleRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        load_details(self.db, user_id, vec![vehicle])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
    }

    /// Overwrites the editable fields of a vehicle.
    ///
    /// # Returns
    /// - `Ok(Vehicle)` - The updated vehicle
    /// - `Err(AppError::NotFound)` - No such vehicle
    /// - `Err(AppError::BadRequest)` - Unknown model or VIN used by another vehicle
    /// - `Err(AppError::Conflict)` - Model does not belong to the submitted make
    pub async fn update(&self, id: Uuid, params: VehicleParams) -> Result<Vehicle, AppError> {
        let repo = VehicleRepository::new(self.db);

        repo.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found.".to_string()))?;

        self.check_catalog(&params).await?;

        if repo.vin_exists(&params.vin, Some(id)).await? {
            return Err(vin_taken());
        }

        match repo.update(id, params).await {
            Ok(Some(vehicle)) => Ok(vehicle),
            Ok(None) => Err(AppError::NotFound("Vehicle not found.".to_string())),
            Err(err) if is_unique_violation(&err) => Err(vin_taken()),
            Err(err) => Err(err.into()),
        }
    }

    /// Soft-deletes a vehicle and removes its images from storage and the database.
    ///
    /// Storage failures are logged and do not stop the deletion.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let repo = VehicleRepository::new(self.db);
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let image_repo = VehicleImageRepository::new(self.db);
        let images = image_repo.get_by_vehicle_ids(vec![id]).await?;
        for image in &images {
            self.destroy_image(&image.image_url).await;
        }

        image_repo.delete_by_vehicle(id).await?;
        repo.soft_delete(id).await?;

        tracing::info!(vehicle_id = %id, images = images.len(), "Vehicle deleted");

        Ok(())
    }

    /// Sells a vehicle to a customer, creating or updating the customer by email and
    /// attaching the uploaded documents.
    ///
    /// Runs in a single transaction: on any failure neither the customer, the
    /// documents nor the vehicle change.
    ///
    /// # Returns
    /// - `Ok(AssignmentOutcome)` - Vehicle now sold to the customer
    /// - `Err(AppError::NotFound)` - No such vehicle
    /// - `Err(AppError::Conflict)` - Vehicle already sold to a different customer
    pub async fn assign_customer(
        &self,
        params: AssignCustomerParams,
    ) -> Result<AssignmentOutcome, AppError> {
        let txn = self.db.begin().await?;

        let vehicle_repo = VehicleRepository::new(&txn);
        let vehicle = vehicle_repo
            .find_by_id(params.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let (customer, _) = CustomerRepository::new(&txn)
            .upsert_by_email(params.customer)
            .await?;

        if vehicle
            .customer_id
            .is_some_and(|current| current != customer.id)
        {
            return Err(AppError::Conflict(
                "Vehicle already assigned to another customer".to_string(),
            ));
        }

        for file in params.documents {
            store_document(
                self.storage,
                &txn,
                UploadDocumentParams {
                    file,
                    category: DocumentCategory::Other,
                    customer_id: Some(customer.id),
                    vehicle_id: Some(vehicle.id),
                },
            )
            .await?;
        }

        let newly_assigned = vehicle.customer_id != Some(customer.id);

        let vehicle = vehicle_repo
            .assign_customer(vehicle.id, customer.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        txn.commit().await?;

        tracing::info!(
            vehicle_id = %vehicle.id,
            customer_id = %customer.id,
            newly_assigned,
            "Vehicle assigned to customer"
        );

        let message = if newly_assigned {
            "Customer created and assigned successfully"
        } else {
            "Customer updated and assigned successfully"
        };

        Ok(AssignmentOutcome {
            vehicle,
            message: message.to_string(),
        })
    }

    /// Registers a vehicle and uploads its images.
    ///
    /// # Returns
    /// - `Ok((Vehicle, urls))` - The new vehicle and the stored image URLs
    /// - `Err(AppError::BadRequest)` - An image is not jpg, jpeg or png
    pub async fn create_with_images(
        &self,
        user_id: Uuid,
        params: VehicleParams,
        images: Vec<UploadedFile>,
    ) -> Result<(Vehicle, Vec<String>), AppError> {
        check_images(&images)?;

        let vehicle = self.create(user_id, params).await?;
        let urls = self.attach_images(vehicle.id, &images).await?;

        Ok((vehicle, urls))
    }

    /// Updates a vehicle, removes the listed images and uploads new ones.
    ///
    /// # Arguments
    /// - `id` - Vehicle to update
    /// - `params` - New vehicle fields
    /// - `deleted_image_ids` - Images to remove; ids of other vehicles are ignored
    /// - `images` - New images to add
    pub async fn update_with_images(
        &self,
        user_id: Uuid,
        id: Uuid,
        params: VehicleParams,
        deleted_image_ids: Vec<Uuid>,
        images: Vec<UploadedFile>,
    ) -> Result<VehicleDetail, AppError> {
        check_images(&images)?;

        let vehicle = self.update(id, params).await?;

        let image_repo = VehicleImageRepository::new(self.db);
        let removed = image_repo
            .get_for_vehicle(vehicle.id, deleted_image_ids)
            .await?;
        for image in &removed {
            self.destroy_image(&image.image_url).await;
        }
        image_repo
            .delete_by_ids(removed.iter().map(|image| image.id).collect())
            .await?;

        self.attach_images(vehicle.id, &images).await?;

        self.get_by_id(user_id, vehicle.id).await
    }

    async fn attach_images(
        &self,
        vehicle_id: Uuid,
        images: &[UploadedFile],
    ) -> Result<Vec<String>, AppError> {
        let image_repo = VehicleImageRepository::new(self.db);
        let mut urls = Vec::with_capacity(images.len());

        for file in images {
            let url = self.storage.upload(IMAGE_FOLDER, file).await?;
            image_repo.create(vehicle_id, url.clone()).await?;
            urls.push(url);
        }

        Ok(urls)
    }

    async fn destroy_image(&self, image_url: &str) {
        let Some(public_id) = extract_public_id(image_url) else {
            return;
        };

        if let Err(err) = self.storage.destroy(&public_id).await {
            tracing::warn!(%public_id, error = %err, "Failed to delete vehicle image");
        }
    }

    /// Ensures the model exists and, when a make is given, belongs to it.
    async fn check_catalog(&self, params: &VehicleParams) -> Result<(), AppError> {
        let model = VehicleModelRepository::new(self.db)
            .find_by_id(params.model_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Model not found.".to_string()))?;

        if params.make_id.is_some_and(|make_id| make_id != model.make_id) {
            return Err(AppError::Conflict(
                "Selected model does not belong to the specified make.".to_string(),
            ));
        }

        Ok(())
    }
}

fn vin_taken() -> AppError {
    AppError::BadRequest("VIN already exists.".to_string())
}

fn check_images(images: &[UploadedFile]) -> Result<(), AppError> {
    if images.iter().all(UploadedFile::is_supported_image) {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "Only jpg, jpeg and png images are allowed".to_string(),
        ))
    }
}

/// Loads models, makes, buyers, images and favorite flags for `vehicles` in one
/// query per table, preserving the input order.
pub(crate) async fn load_details(
    db: &DatabaseConnection,
    user_id: Uuid,
    vehicles: Vec<Vehicle>,
) -> Result<Vec<VehicleDetail>, AppError> {
    if vehicles.is_empty() {
        return Ok(Vec::new());
    }

    let mut model_ids: Vec<i32> = vehicles.iter().map(|v| v.model_id).collect();
    model_ids.sort_unstable();
    model_ids.dedup();
    let models: HashMap<i32, _> = VehicleModelRepository::new(db)
        .find_by_ids(model_ids)
        .await?
        .into_iter()
        .map(|model| (model.id, model))
        .collect();

    let mut make_ids: Vec<i32> = models.values().map(|m| m.make_id).collect();
    make_ids.sort_unstable();
    make_ids.dedup();
    let makes: HashMap<i32, _> = MakeRepository::new(db)
        .find_by_ids(make_ids)
        .await?
        .into_iter()
        .map(|make| (make.id, make))
        .collect();

    let customer_ids: Vec<Uuid> = vehicles.iter().filter_map(|v| v.customer_id).collect();
    let customers: HashMap<Uuid, _> = CustomerRepository::new(db)
        .find_by_ids(customer_ids)
        .await?
        .into_iter()
        .map(|customer| (customer.id, customer))
        .collect();

    let vehicle_ids: Vec<Uuid> = vehicles.iter().map(|v| v.id).collect();
    let mut images: HashMap<Uuid, Vec<_>> = HashMap::new();
    for image in VehicleImageRepository::new(db)
        .get_by_vehicle_ids(vehicle_ids.clone())
        .await?
    {
        images.entry(image.vehicle_id).or_default().push(image);
    }

    let favorites = FavoriteRepository::new(db)
        .favorited_among(user_id, vehicle_ids)
        .await?;

    let details = vehicles
        .into_iter()
        .filter_map(|vehicle| {
            let Some(model) = models.get(&vehicle.model_id).cloned() else {
                tracing::warn!(vehicle_id = %vehicle.id, "Vehicle model missing");
                return None;
            };
            let make = makes.get(&model.make_id).cloned()?;

            Some(VehicleDetail {
                customer: vehicle
                    .customer_id
                    .and_then(|id| customers.get(&id).cloned()),
                images: images.remove(&vehicle.id).unwrap_or_default(),
                is_favorite: favorites.contains(&vehicle.id),
                vehicle,
                model,
                make,
            })
        })
        .collect();

    Ok(details)
}
