use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        import::{
            BulkCreateDto, BulkCreateResponseDto, ImportRowDto, MakeModelValidationDto,
            ValidateMakeModelDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            import::{BulkVehicleRow, ImportRow},
            vehicle::Vehicle,
        },
        service::{geo::GeoService, import::ImportService, vin::VinService},
        state::AppState,
        util::multipart::MultipartForm,
    },
};

/// Tag for grouping CSV import endpoints in OpenAPI documentation
pub static IMPORT_TAG: &str = "import";

fn import_service(state: &AppState) -> ImportService<'_> {
    ImportService::new(
        &state.db,
        VinService::new(&state.db, &state.http_client, &state.apis.nhtsa_api_url),
        GeoService::new(
            &state.http_client,
            &state.apis.google_geocode_url,
            state.apis.google_maps_api_key.as_deref(),
        ),
    )
}

/// Parse an uploaded CSV of vehicles for review.
///
/// Each row is enriched with a VIN decode and geocoding; decode failures are
/// reported per row instead of failing the upload.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `200 OK` - One entry per CSV row
/// - `400 Bad Request` - No `file` part or unreadable CSV
#[utoipa::path(
    post,
    path = "/vehicles/import/parse",
    tag = IMPORT_TAG,
    request_body(content_type = "multipart/form-data", description = "CSV `file` with VIN, Make, Model, Year, Combined Location, Coordinates"),
    responses(
        (status = 200, description = "Parsed rows", body = Vec<ImportRowDto>),
        (status = 400, description = "Missing or invalid CSV file", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn parse_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let mut form = MultipartForm::read(multipart).await?;
    let Some(file) = form.take_files("file").into_iter().next() else {
        return Err(AppError::BadRequest("CSV file is required".to_string()));
    };

    let rows = import_service(&state).parse(&file.bytes).await?;

    Ok((
        StatusCode::OK,
        Json(rows.into_iter().map(ImportRow::into_dto).collect::<Vec<_>>()),
    ))
}

/// Check a make/model pair from an import row against the catalog.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    post,
    path = "/vehicles/import/validate-make-model",
    tag = IMPORT_TAG,
    request_body = ValidateMakeModelDto,
    responses(
        (status = 200, description = "Validation messages, absent when valid", body = MakeModelValidationDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn validate_make_model(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ValidateMakeModelDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let validation = import_service(&state)
        .validate_make_model(&payload.make, &payload.model)
        .await?;

    Ok((StatusCode::OK, Json(validation.into_dto())))
}

/// Create the reviewed import rows in one transaction.
///
/// # Access Control
/// - Authenticated; the caller is recorded as creator of every vehicle
///
/// # Returns
/// - `201 Created` - The created vehicles
/// - `400 Bad Request` - A row is incomplete, has an unknown make or model, or
///   reuses a VIN; nothing is created
#[utoipa::path(
    post,
    path = "/vehicles/import/bulk",
    tag = IMPORT_TAG,
    request_body = BulkCreateDto,
    responses(
        (status = 201, description = "Vehicles created", body = BulkCreateResponseDto),
        (status = 400, description = "Invalid import row", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn bulk_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BulkCreateDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let rows = payload
        .vehicles
        .into_iter()
        .map(BulkVehicleRow::from_dto)
        .collect();

    let vehicles = import_service(&state).bulk_create(user.id, rows).await?;

    Ok((
        StatusCode::CREATED,
        Json(BulkCreateResponseDto {
            message: format!("{} vehicles imported successfully", vehicles.len()),
            vehicles: vehicles.into_iter().map(Vehicle::into_dto).collect(),
        }),
    ))
}
