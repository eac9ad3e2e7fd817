//! Vehicle inventory domain models and parameters.
//!
//! Covers the stored vehicle, its images, the enriched detail view returned by list
//! and detail endpoints, and the filter shared by listing, map points and CSV export.
//! Create and update input is validated once here, when converting from the DTO.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::VehicleStatus;
use uuid::Uuid;

use crate::{
    model::vehicle::{
        MapPointDto, PaginatedVehiclesDto, VehicleDetailDto, VehicleDto, VehicleImageDto,
        VehicleInputDto, VehicleModelWithMakeDto, VehicleQueryDto,
    },
    server::{
        error::AppError,
        model::{
            customer::{Customer, CustomerParams},
            make::{Make, VehicleModel},
            upload::UploadedFile,
        },
        util::validation::{is_valid_vin, is_valid_zipcode, Validator},
    },
};

pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Vehicle as stored, without related rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub model_id: i32,
    /// User who registered the vehicle.
    pub user_id: Uuid,
    /// Buyer, set once the vehicle is assigned.
    pub customer_id: Option<Uuid>,
    pub year: String,
    pub vin: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zipcode: String,
    pub status: VehicleStatus,
    /// `"lat,lng"` coordinates, empty when unknown.
    pub location: String,
    pub assigned_date: Option<DateTime<Utc>>,
    /// Whether the vehicle was created by CSV import.
    pub imported: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn from_entity(entity: entity::vehicle::Model) -> Self {
        Self {
            id: entity.id,
            model_id: entity.model_id,
            user_id: entity.user_id,
            customer_id: entity.customer_id,
            year: entity.year,
            vin: entity.vin,
            street: entity.street,
            city: entity.city,
            state: entity.state,
            country: entity.country,
            zipcode: entity.zipcode,
            status: entity.status,
            location: entity.location,
            assigned_date: entity.assigned_date,
            imported: entity.imported,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> VehicleDto {
        VehicleDto {
            id: self.id,
            model_id: self.model_id,
            user_id: self.user_id,
            customer_id: self.customer_id,
            year: self.year,
            vin: self.vin,
            street: self.street,
            city: self.city,
            state: self.state,
            country: self.country,
            zipcode: self.zipcode,
            status: status_name(self.status).to_string(),
            location: self.location,
            assigned_date: self.assigned_date,
            imported: self.imported,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Stored representation of a status.
pub fn status_name(status: VehicleStatus) -> &'static str {
    match status {
        VehicleStatus::InStock => "in stock",
        VehicleStatus::Sold => "sold",
    }
}

/// Parses a status case-insensitively, ignoring surrounding whitespace.
pub fn parse_status(value: &str) -> Option<VehicleStatus> {
    match value.trim().to_lowercase().as_str() {
        "in stock" => Some(VehicleStatus::InStock),
        "sold" => Some(VehicleStatus::Sold),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleImage {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub image_url: String,
}

impl VehicleImage {
    pub fn from_entity(entity: entity::vehicle_image::Model) -> Self {
        Self {
            id: entity.id,
            vehicle_id: entity.vehicle_id,
            image_url: entity.image_url,
        }
    }

    pub fn into_dto(self) -> VehicleImageDto {
        VehicleImageDto {
            id: self.id,
            image_url: self.image_url,
        }
    }
}

/// Vehicle enriched with its model, make, buyer, images and the caller's favorite flag.
#[derive(Debug, Clone)]
pub struct VehicleDetail {
    pub vehicle: Vehicle,
    pub model: VehicleModel,
    pub make: Make,
    pub customer: Option<Customer>,
    pub images: Vec<VehicleImage>,
    pub is_favorite: bool,
}

impl VehicleDetail {
    pub fn into_dto(self) -> VehicleDetailDto {
        VehicleDetailDto {
            vehicle: self.vehicle.into_dto(),
            model: VehicleModelWithMakeDto {
                id: self.model.id,
                name: self.model.name,
                make: self.make.into_dto(),
            },
            customer: self.customer.map(Customer::into_dto),
            images: self.images.into_iter().map(VehicleImage::into_dto).collect(),
            is_favorite: self.is_favorite,
        }
    }
}

/// Validated vehicle fields for create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleParams {
    pub model_id: i32,
    /// When present the model must belong to this make.
    pub make_id: Option<i32>,
    pub vin: String,
    pub year: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zipcode: String,
    pub status: VehicleStatus,
    pub location: String,
}

impl VehicleParams {
    /// Validates the submitted vehicle fields.
    ///
    /// Text fields are trimmed; a missing status defaults to `in stock`.
    ///
    /// # Returns
    /// - `Ok(VehicleParams)` - Every field present and well formed
    /// - `Err(AppError::Validation)` - One entry per rejected field
    pub fn from_dto(dto: VehicleInputDto) -> Result<Self, AppError> {
        let vin = dto.vin.trim().to_string();
        let year = dto.year.trim().to_string();
        let street = dto.street.trim().to_string();
        let city = dto.city.trim().to_string();
        let state = dto.state.trim().to_string();
        let country = dto.country.trim().to_string();
        let zipcode = dto.zipcode.trim().to_string();
        let location = dto.location.trim().to_string();
        let status = match dto.status.as_deref().map(str::trim) {
            None | Some("") => Some(VehicleStatus::InStock),
            Some(value) => parse_status(value),
        };

        let mut validator = Validator::new();
        validator
            .check("model_id", dto.model_id.is_some(), "Model is required")
            .required("vin", &vin, "Vehicle VIN is required.")
            .check(
                "vin",
                vin.chars().count() == 17,
                "VIN must be exactly 17 characters long",
            )
            .check("vin", is_valid_vin(&vin), "VIN contains invalid characters")
            .required("year", &year, "Vehicle Year is required.")
            .required("street", &street, "Street is required")
            .required("city", &city, "City is required")
            .required("state", &state, "State is required")
            .required("country", &country, "Country is required")
            .required("zipcode", &zipcode, "Zip Code is required.")
            .check("zipcode", is_valid_zipcode(&zipcode), "Invalid postal code")
            .required("location", &location, "Vehicle location is required.")
            .check(
                "status",
                status.is_some(),
                "Status must be either 'in stock' or 'sold'",
            );
        validator.finish()?;

        let (Some(model_id), Some(status)) = (dto.model_id, status) else {
            return Err(AppError::BadRequest("Invalid vehicle data".to_string()));
        };

        Ok(Self {
            model_id,
            make_id: dto.make_id,
            vin,
            year,
            street,
            city,
            state,
            country,
            zipcode,
            status,
            location,
        })
    }
}

/// Filters shared by the list, map and export endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilter {
    /// Case-insensitive fragment matched against model name, make name, year and VIN.
    pub search: Option<String>,
    /// Make name, matched case-insensitively.
    pub make: Option<String>,
    /// Exact model names; requires `make`.
    pub models: Vec<String>,
    /// Status name, matched case-insensitively.
    pub availability: Option<String>,
}

impl VehicleFilter {
    /// Rejects a model filter that is not scoped to a make.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.models.is_empty() && self.make.is_none() {
            return Err(AppError::BadRequest(
                "Make must be selected when filtering by model.".to_string(),
            ));
        }
        Ok(())
    }

    /// Human-readable summary used in the CSV export header.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(make) = &self.make {
            parts.push(format!("Make: {}", make));
        }
        if !self.models.is_empty() {
            parts.push(format!("Model: {}", self.models.join(", ")));
        }
        if let Some(availability) = &self.availability {
            parts.push(format!("Status: {}", availability));
        }
        if let Some(search) = &self.search {
            parts.push(format!("Search: \"{}\"", search));
        }

        if parts.is_empty() {
            "None".to_string()
        } else {
            parts.join("; ")
        }
    }
}

/// Validated query of the vehicle list, map and export endpoints.
///
/// Blank values count as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleQuery {
    pub page: u64,
    pub limit: u64,
    pub kind: Option<String>,
    pub filter: VehicleFilter,
}

impl VehicleQuery {
    pub fn from_dto(dto: VehicleQueryDto) -> Result<Self, AppError> {
        let page = match non_blank(dto.page) {
            Some(value) => parse_positive("page", &value)?,
            None => 1,
        };
        let limit = match non_blank(dto.limit) {
            Some(value) => parse_positive("limit", &value)?,
            None => DEFAULT_PAGE_LIMIT,
        };

        Ok(Self {
            page,
            limit,
            kind: non_blank(dto.kind),
            filter: VehicleFilter {
                search: non_blank(dto.search),
                make: non_blank(dto.make),
                availability: non_blank(dto.availability),
                models: dto
                    .model
                    .into_iter()
                    .chain(dto.model_brackets)
                    .filter_map(|m| non_blank(Some(m)))
                    .collect(),
            },
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_positive(name: &str, value: &str) -> Result<u64, AppError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| AppError::BadRequest(format!("{} must be a positive integer", name)))
}

/// Parameters for a paginated vehicle listing.
#[derive(Debug, Clone)]
pub struct GetVehiclesParams {
    /// Caller, used to compute `is_favorite`.
    pub user_id: Uuid,
    /// 1-based page number.
    pub page: u64,
    pub limit: u64,
    pub filter: VehicleFilter,
}

#[derive(Debug, Clone)]
pub struct PaginatedVehicles {
    pub vehicles: Vec<VehicleDetail>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginatedVehicles {
    pub fn into_dto(self) -> PaginatedVehiclesDto {
        PaginatedVehiclesDto {
            vehicles: self
                .vehicles
                .into_iter()
                .map(VehicleDetail::into_dto)
                .collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub id: Uuid,
    pub location: String,
}

impl MapPoint {
    pub fn into_dto(self) -> MapPointDto {
        MapPointDto {
            id: self.id,
            location: self.location,
        }
    }
}

/// Parameters for selling a vehicle to a customer.
#[derive(Debug, Clone)]
pub struct AssignCustomerParams {
    pub vehicle_id: Uuid,
    pub customer: CustomerParams,
    /// Files stored as documents of the customer and vehicle.
    pub documents: Vec<UploadedFile>,
}

/// Result of an assignment: the updated vehicle and a message describing it.
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    pub vehicle: Vehicle,
    pub message: String,
}
