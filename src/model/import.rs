use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::vehicle::VehicleDto;

/// One parsed CSV row after VIN decoding and geocoding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowDto {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub coordinates: String,
    pub combined_location: String,
    pub error: Option<String>,
    pub vin_exists: bool,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ValidateMakeModelDto {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MakeModelValidationDto {
    pub make_msg: Option<String>,
    pub model_msg: Option<String>,
}

/// Row accepted by the bulk import endpoint.
#[derive(Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkVehicleRowDto {
    #[serde(default)]
    pub vin: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub coordinates: String,
    #[serde(default)]
    pub combined_location: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct BulkCreateDto {
    pub vehicles: Vec<BulkVehicleRowDto>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct BulkCreateResponseDto {
    pub message: String,
    pub vehicles: Vec<VehicleDto>,
}
