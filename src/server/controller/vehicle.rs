use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::Query;
use uuid::Uuid;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        customer::CustomerInputDto,
        vehicle::{
            AssignCustomerResponseDto, MapPointDto, PaginatedVehiclesDto, VehicleDetailDto,
            VehicleDto, VehicleInputDto, VehicleQueryDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            customer::CustomerParams,
            export::ExportKind,
            vehicle::{
                AssignCustomerParams, GetVehiclesParams, MapPoint, VehicleParams, VehicleQuery,
            },
        },
        service::{export::ExportService, vehicle::VehicleService},
        state::AppState,
        util::multipart::MultipartForm,
    },
};

/// Tag for grouping vehicle endpoints in OpenAPI documentation
pub static VEHICLE_TAG: &str = "vehicle";

/// Create a vehicle.
///
/// # Access Control
/// - Authenticated; the caller is recorded as the vehicle's creator
///
/// # Returns
/// - `201 Created` - The new vehicle
/// - `400 Bad Request` - Invalid fields, unknown model or duplicate VIN
/// - `409 Conflict` - The model does not belong to the given make
#[utoipa::path(
    post,
    path = "/vehicles",
    tag = VEHICLE_TAG,
    request_body = VehicleInputDto,
    responses(
        (status = 201, description = "Vehicle created", body = VehicleDto),
        (status = 400, description = "Invalid vehicle data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 409, description = "Model does not belong to the make", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<VehicleInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let params = VehicleParams::from_dto(payload)?;

    let service = VehicleService::new(&state.db, state.storage.as_ref());
    let vehicle = service.create(user.id, params).await?;

    Ok((StatusCode::CREATED, Json(vehicle.into_dto())))
}

/// List vehicles, newest first.
///
/// `model` may repeat to filter on several models of the selected make.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `200 OK` - Page of vehicles with model, make, images and favorite flag
/// - `400 Bad Request` - Bad pagination or a model filter without a make
#[utoipa::path(
    get,
    path = "/vehicles",
    tag = VEHICLE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10)"),
        ("search" = Option<String>, Query, description = "Matches model, make, year or VIN"),
        ("make" = Option<String>, Query, description = "Make name"),
        ("model" = Option<Vec<String>>, Query, description = "Model names, requires make"),
        ("availability" = Option<String>, Query, description = "`in stock` or `sold`")
    ),
    responses(
        (status = 200, description = "Page of vehicles", body = PaginatedVehiclesDto),
        (status = 400, description = "Invalid filters", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_vehicles(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<VehicleQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let query = VehicleQuery::from_dto(query)?;

    let service = VehicleService::new(&state.db, state.storage.as_ref());
    let vehicles = service
        .get_paginated(GetVehiclesParams {
            user_id: user.id,
            page: query.page,
            limit: query.limit,
            filter: query.filter,
        })
        .await?;

    Ok((StatusCode::OK, Json(vehicles.into_dto())))
}

/// Coordinates of every vehicle matching the list filters.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    get,
    path = "/vehicles/map",
    tag = VEHICLE_TAG,
    params(
        ("search" = Option<String>, Query, description = "Matches model, make, year or VIN"),
        ("make" = Option<String>, Query, description = "Make name"),
        ("model" = Option<Vec<String>>, Query, description = "Model names, requires make"),
        ("availability" = Option<String>, Query, description = "`in stock` or `sold`")
    ),
    responses(
        (status = 200, description = "Vehicle locations", body = Vec<MapPointDto>),
        (status = 400, description = "Invalid filters", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_map_points(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<VehicleQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let query = VehicleQuery::from_dto(query)?;

    let service = VehicleService::new(&state.db, state.storage.as_ref());
    let points = service.get_map_points(query.filter).await?;

    Ok((
        StatusCode::OK,
        Json(points.into_iter().map(MapPoint::into_dto).collect::<Vec<_>>()),
    ))
}

/// Download the vehicles matching the list filters as CSV.
///
/// `type=favorites` restricts the export to the caller's favorites.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `200 OK` - `text/csv` attachment
/// - `400 Bad Request` - Unknown export type or a model filter without a make
/// - `404 Not Found` - Nothing matches
#[utoipa::path(
    get,
    path = "/vehicles/export",
    tag = VEHICLE_TAG,
    params(
        ("type" = Option<String>, Query, description = "`vehicles` (default) or `favorites`"),
        ("search" = Option<String>, Query, description = "Matches model, make, year or VIN"),
        ("make" = Option<String>, Query, description = "Make name"),
        ("model" = Option<Vec<String>>, Query, description = "Model names, requires make"),
        ("availability" = Option<String>, Query, description = "`in stock` or `sold`")
    ),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid filters", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "No vehicles to export", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_vehicles(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<VehicleQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let query = VehicleQuery::from_dto(query)?;
    let kind = ExportKind::parse(query.kind.as_deref())?;

    let export = ExportService::new(&state.db)
        .export(user.id, kind, query.filter)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.content,
    ))
}

/// Get a vehicle with its model, make, customer and images.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    get,
    path = "/vehicles/{id}",
    tag = VEHICLE_TAG,
    params(
        ("id" = Uuid, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 200, description = "The vehicle", body = VehicleDetailDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let service = VehicleService::new(&state.db, state.storage.as_ref());
    let vehicle = service.get_by_id(user.id, id).await?;

    Ok((StatusCode::OK, Json(vehicle.into_dto())))
}

/// Replace a vehicle's fields.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `200 OK` - The updated vehicle
/// - `400 Bad Request` - Invalid fields, unknown model or duplicate VIN
/// - `404 Not Found` - No vehicle with that id
/// - `409 Conflict` - The model does not belong to the given make
#[utoipa::path(
    put,
    path = "/vehicles/{id}",
    tag = VEHICLE_TAG,
    params(
        ("id" = Uuid, Path, description = "Vehicle ID")
    ),
    request_body = VehicleInputDto,
    responses(
        (status = 200, description = "Vehicle updated", body = VehicleDto),
        (status = 400, description = "Invalid vehicle data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 409, description = "Model does not belong to the make", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<VehicleInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let params = VehicleParams::from_dto(payload)?;

    let service = VehicleService::new(&state.db, state.storage.as_ref());
    let vehicle = service.update(id, params).await?;

    Ok((StatusCode::OK, Json(vehicle.into_dto())))
}

/// Delete a vehicle and its stored images.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    delete,
    path = "/vehicles/{id}",
    tag = VEHICLE_TAG,
    params(
        ("id" = Uuid, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 200, description = "Vehicle deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let service = VehicleService::new(&state.db, state.storage.as_ref());
    service.delete(id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new(
            "Vehicle and associated images deleted successfully",
        )),
    ))
}

/// Sell a vehicle to a customer.
///
/// Multipart body with the customer's `email`, `firstName`, `lastName` and `phone`
/// text parts and any number of `documents` files. The customer is created or
/// updated by email and the documents are linked to both customer and vehicle.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `200 OK` - The sold vehicle and whether the customer was created or updated
/// - `400 Bad Request` - Invalid customer fields
/// - `404 Not Found` - No vehicle with that id
/// - `409 Conflict` - Vehicle already assigned to another customer
#[utoipa::path(
    post,
    path = "/vehicles/{id}/assign-customer",
    tag = VEHICLE_TAG,
    params(
        ("id" = Uuid, Path, description = "Vehicle ID")
    ),
    request_body(content_type = "multipart/form-data", description = "Customer fields and documents"),
    responses(
        (status = 200, description = "Customer assigned", body = AssignCustomerResponseDto),
        (status = 400, description = "Invalid customer data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 409, description = "Vehicle already assigned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let mut form = MultipartForm::read(multipart).await?;
    let customer = CustomerParams::from_dto(CustomerInputDto {
        email: form.text("email").unwrap_or_default(),
        first_name: form.text("firstName").unwrap_or_default(),
        last_name: form.text("lastName").unwrap_or_default(),
        phone: form.text("phone").unwrap_or_default(),
    })?;

    let service = VehicleService::new(&state.db, state.storage.as_ref());
    let outcome = service
        .assign_customer(AssignCustomerParams {
            vehicle_id: id,
            customer,
            documents: form.take_files("documents"),
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(AssignCustomerResponseDto {
            vehicle: outcome.vehicle.into_dto(),
            message: outcome.message,
        }),
    ))
}
