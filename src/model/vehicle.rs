use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::{customer::CustomerDto, make::MakeDto};

/// Vehicle fields accepted on create and update.
///
/// Multipart upload endpoints build the same structure from their text parts.
#[derive(Deserialize, Debug, Clone, Default, ToSchema)]
pub struct VehicleInputDto {
    pub model_id: Option<i32>,
    pub make_id: Option<i32>,
    #[serde(default)]
    pub vin: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub zipcode: String,
    /// `in stock` or `sold`, defaults to `in stock`.
    pub status: Option<String>,
    #[serde(default)]
    pub location: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct VehicleDto {
    pub id: Uuid,
    pub model_id: i32,
    pub user_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub year: String,
    pub vin: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zipcode: String,
    pub status: String,
    pub location: String,
    #[serde(rename = "assignedDate")]
    pub assigned_date: Option<DateTime<Utc>>,
    pub imported: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct VehicleImageDto {
    pub id: Uuid,
    pub image_url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct VehicleModelWithMakeDto {
    pub id: i32,
    pub name: String,
    pub make: MakeDto,
}

/// Vehicle together with its catalog entry, buyer, images and the caller's favorite flag.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct VehicleDetailDto {
    #[serde(flatten)]
    pub vehicle: VehicleDto,
    pub model: VehicleModelWithMakeDto,
    pub customer: Option<CustomerDto>,
    pub images: Vec<VehicleImageDto>,
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PaginatedVehiclesDto {
    pub vehicles: Vec<VehicleDetailDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct MapPointDto {
    pub id: Uuid,
    pub location: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct VehicleWithImagesDto {
    pub vehicle: VehicleDto,
    pub images: Vec<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct AssignCustomerResponseDto {
    pub vehicle: VehicleDto,
    pub message: String,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequestDto {
    pub vehicle_id: Uuid,
}

/// Query string of the vehicle list, map and export endpoints.
///
/// `model` may repeat (`model=a&model=b`) and is also accepted as `model[]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VehicleQueryDto {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub search: Option<String>,
    pub make: Option<String>,
    pub availability: Option<String>,
    pub model: Vec<String>,
    #[serde(rename = "model[]")]
    pub model_brackets: Vec<String>,
}
