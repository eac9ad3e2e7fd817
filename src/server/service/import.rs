//! CSV inventory import.
//!
//! An upload is first parsed into reviewable rows (VIN decoded, missing fields
//! filled in, coordinates and addresses geocoded); the reviewed rows are then
//! created in a single transaction.

use entity::sea_orm_active_enums::VehicleStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{make::MakeRepository, vehicle::VehicleRepository, vehicle_model::VehicleModelRepository},
    error::AppError,
    model::{
        import::{BulkVehicleRow, CsvVehicleRecord, ImportRow, MakeModelValidation},
        vehicle::{Vehicle, VehicleParams},
    },
    service::{
        geo::{parse_coordinates, GeoService},
        vin::VinService,
    },
    util::normalize::normalize_name,
};

pub struct ImportService<'a> {
    db: &'a DatabaseConnection,
    vin: VinService<'a>,
    geo: GeoService<'a>,
}

impl<'a> ImportService<'a> {
    pub fn new(db: &'a DatabaseConnection, vin: VinService<'a>, geo: GeoService<'a>) -> Self {
        Self { db, vin, geo }
    }

    /// Parses an uploaded CSV into rows for review.
    ///
    /// Expected columns: `VIN, Make, Model, Year, Combined Location, Coordinates`.
    /// Decode failures are reported per row; geocoding failures only leave the
    /// field empty.
    ///
    /// # Returns
    /// - `Ok(Vec<ImportRow>)` - One row per CSV record, in file order
    /// - `Err(AppError::BadRequest)` - File is not valid CSV
    pub async fn parse(&self, content: &[u8]) -> Result<Vec<ImportRow>, AppError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content);

        let records = reader
            .deserialize::<CsvVehicleRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| AppError::BadRequest(format!("Invalid CSV file: {}", err)))?;

        let vehicles = VehicleRepository::new(self.db);
        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            let vin_exists = vehicles.vin_exists(&record.vin, None).await?;

            let (decoded, error) = match self.vin.decode_and_register(&record.vin).await {
                Ok(registered) => (Some(registered.decoded), None),
                Err(AppError::BadRequest(msg)) => (None, Some(msg)),
                Err(err) => {
                    tracing::warn!(vin = %record.vin, error = %err, "VIN lookup failed");
                    (None, Some("VIN lookup failed".to_string()))
                }
            };

            let mut coordinates = record.coordinates;
            let mut combined_location = record.combined_location;
            if coordinates.is_empty() && !combined_location.is_empty() {
                coordinates = self.geocode(&combined_location).await;
            } else if combined_location.is_empty() && !coordinates.is_empty() {
                combined_location = self.reverse_geocode(&coordinates).await;
            }

            let fill = |given: String, decoded: Option<&String>| {
                if given.is_empty() {
                    decoded.cloned().unwrap_or_default()
                } else {
                    given
                }
            };

            rows.push(ImportRow {
                make: fill(record.make, decoded.as_ref().map(|d| &d.make)),
                model: fill(record.model, decoded.as_ref().map(|d| &d.model)),
                year: fill(record.year, decoded.as_ref().map(|d| &d.year)),
                vin: record.vin,
                coordinates,
                combined_location,
                error,
                vin_exists,
            });
        }

        tracing::info!(rows = rows.len(), "Import file parsed");

        Ok(rows)
    }

    /// Checks a make/model pair against the catalog, ignoring case.
    pub async fn validate_make_model(
        &self,
        make: &str,
        model: &str,
    ) -> Result<MakeModelValidation, AppError> {
        let Some(found) = MakeRepository::new(self.db)
            .find_by_name_ci(&normalize_name(make))
            .await?
        else {
            return Ok(MakeModelValidation {
                make_msg: Some("Make not found".to_string()),
                model_msg: Some("Cannot validate model without a valid make".to_string()),
            });
        };

        let model_msg = VehicleModelRepository::new(self.db)
            .find_by_name_ci(found.id, &normalize_name(model))
            .await?
            .is_none()
            .then(|| "Model does not match the specified make".to_string());

        Ok(MakeModelValidation {
            make_msg: None,
            model_msg,
        })
    }

    /// Creates the reviewed rows as imported, in-stock vehicles of `user_id`.
    ///
    /// All rows are inserted in one transaction; the first invalid row aborts the
    /// whole import.
    ///
    /// # Returns
    /// - `Ok(Vec<Vehicle>)` - The created vehicles
    /// - `Err(AppError::BadRequest)` - A row is incomplete, references an unknown
    ///   make or model, or reuses a VIN
    pub async fn bulk_create(
        &self,
        user_id: Uuid,
        rows: Vec<BulkVehicleRow>,
    ) -> Result<Vec<Vehicle>, AppError> {
        let txn = self.db.begin().await?;
        let makes = MakeRepository::new(&txn);
        let models = VehicleModelRepository::new(&txn);
        let vehicles = VehicleRepository::new(&txn);
        let mut created = Vec::with_capacity(rows.len());

        for row in rows {
            if !row.is_complete() {
                return Err(AppError::BadRequest(
                    "Missing required vehicle fields.".to_string(),
                ));
            }

            let make = makes.find_by_name_ci(&row.make).await?.ok_or_else(|| {
                AppError::BadRequest(format!("Make '{}' not found.", row.make))
            })?;
            let model = models
                .find_by_name_ci(make.id, &row.model)
                .await?
                .ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Model '{}' not found or does not belong to make '{}'.",
                        row.model, row.make
                    ))
                })?;

            if vehicles.vin_exists(&row.vin, None).await? {
                return Err(AppError::BadRequest(format!(
                    "VIN '{}' already exists.",
                    row.vin
                )));
            }

            let params = VehicleParams {
                model_id: model.id,
                make_id: Some(make.id),
                vin: row.vin,
                year: row.year,
                street: row.combined_location,
                city: String::new(),
                state: String::new(),
                country: String::new(),
                zipcode: String::new(),
                status: VehicleStatus::InStock,
                location: row.coordinates,
            };
            created.push(vehicles.create(user_id, params, true).await?);
        }

        txn.commit().await?;

        tracing::info!(count = created.len(), %user_id, "Vehicles imported");

        Ok(created)
    }

    async fn geocode(&self, address: &str) -> String {
        self.geo
            .coordinates_from_address(address)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(%address, error = %err, "Geocoding failed");
                String::new()
            })
    }

    async fn reverse_geocode(&self, coordinates: &str) -> String {
        let Some((lat, lng)) = parse_coordinates(coordinates) else {
            return String::new();
        };

        self.geo
            .address_from_coordinates(lat, lng)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(%coordinates, error = %err, "Reverse geocoding failed");
                String::new()
            })
    }
}
