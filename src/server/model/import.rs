//! CSV import domain models.

use crate::model::import::{BulkVehicleRowDto, ImportRowDto, MakeModelValidationDto};

/// Raw row of an uploaded inventory CSV.
///
/// Columns are matched by header name; missing columns read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct CsvVehicleRecord {
    #[serde(rename = "VIN", default)]
    pub vin: String,
    #[serde(rename = "Make", default)]
    pub make: String,
    #[serde(rename = "Model", default)]
    pub model: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Combined Location", default)]
    pub combined_location: String,
    #[serde(rename = "Coordinates", default)]
    pub coordinates: String,
}

/// Row after VIN decoding and geocoding, shown to the user for review.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub coordinates: String,
    pub combined_location: String,
    /// Why the VIN could not be decoded.
    pub error: Option<String>,
    /// A vehicle with this VIN is already stored.
    pub vin_exists: bool,
}

impl ImportRow {
    pub fn into_dto(self) -> ImportRowDto {
        ImportRowDto {
            vin: self.vin,
            make: self.make,
            model: self.model,
            year: self.year,
            coordinates: self.coordinates,
            combined_location: self.combined_location,
            error: self.error,
            vin_exists: self.vin_exists,
        }
    }
}

/// Outcome of checking a make/model pair against the catalog; `None` means valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MakeModelValidation {
    pub make_msg: Option<String>,
    pub model_msg: Option<String>,
}

impl MakeModelValidation {
    pub fn into_dto(self) -> MakeModelValidationDto {
        MakeModelValidationDto {
            make_msg: self.make_msg,
            model_msg: self.model_msg,
        }
    }
}

/// Reviewed row submitted for bulk creation.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkVehicleRow {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub coordinates: String,
    pub combined_location: String,
}

impl BulkVehicleRow {
    pub fn from_dto(dto: BulkVehicleRowDto) -> Self {
        Self {
            vin: dto.vin.trim().to_string(),
            make: dto.make.trim().to_string(),
            model: dto.model.trim().to_string(),
            year: dto.year.trim().to_string(),
            coordinates: dto.coordinates.trim().to_string(),
            combined_location: dto.combined_location.trim().to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        [
            &self.vin,
            &self.make,
            &self.model,
            &self.year,
            &self.coordinates,
            &self.combined_location,
        ]
        .iter()
        .all(|v| !v.is_empty())
    }
}
