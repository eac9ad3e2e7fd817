use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::ErrorDto,
        vehicle::{VehicleDetailDto, VehicleInputDto, VehicleWithImagesDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::vehicle::VehicleParams,
        service::vehicle::VehicleService,
        state::AppState,
        util::multipart::MultipartForm,
    },
};

/// Tag for grouping multipart vehicle endpoints in OpenAPI documentation
pub static UPLOAD_TAG: &str = "upload";

/// Create a vehicle together with its images.
///
/// Multipart body with the vehicle fields as text parts and any number of `images`
/// files (jpg, jpeg or png).
///
/// # Access Control
/// - Authenticated; the caller is recorded as the vehicle's creator
///
/// # Returns
/// - `201 Created` - The vehicle and the stored image URLs
/// - `400 Bad Request` - Invalid fields, unsupported image type or duplicate VIN
/// - `409 Conflict` - The model does not belong to the given make
#[utoipa::path(
    post,
    path = "/upload-vehicle-with-images",
    tag = UPLOAD_TAG,
    request_body(content_type = "multipart/form-data", description = "Vehicle fields and `images` files"),
    responses(
        (status = 201, description = "Vehicle created", body = VehicleWithImagesDto),
        (status = 400, description = "Invalid vehicle data or image", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 409, description = "Model does not belong to the make", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_vehicle_with_images(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let mut form = MultipartForm::read(multipart).await?;
    let params = VehicleParams::from_dto(vehicle_input(&form)?)?;
    let images = form.take_files("images");

    let service = VehicleService::new(&state.db, state.storage.as_ref());
    let (vehicle, images) = service.create_with_images(user.id, params, images).await?;

    Ok((
        StatusCode::CREATED,
        Json(VehicleWithImagesDto {
            vehicle: vehicle.into_dto(),
            images,
        }),
    ))
}

/// Update a vehicle, remove some of its images and add new ones.
///
/// Besides the vehicle fields and `images` files, `deletedImageIds` lists the
/// images to remove, either repeated or as one JSON array.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `200 OK` - The vehicle with its remaining images
/// - `400 Bad Request` - Invalid fields, image ids or image type
/// - `404 Not Found` - No vehicle with that id
#[utoipa::path(
    put,
    path = "/upload-vehicle-with-images/{id}",
    tag = UPLOAD_TAG,
    params(
        ("id" = Uuid, Path, description = "Vehicle ID")
    ),
    request_body(content_type = "multipart/form-data", description = "Vehicle fields, `deletedImageIds` and `images` files"),
    responses(
        (status = 200, description = "Vehicle updated", body = VehicleDetailDto),
        (status = 400, description = "Invalid vehicle data or image", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 409, description = "Model does not belong to the make", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_vehicle_with_images(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let mut form = MultipartForm::read(multipart).await?;
    let params = VehicleParams::from_dto(vehicle_input(&form)?)?;
    let deleted_image_ids = deleted_image_ids(&form.texts("deletedImageIds"))?;
    let images = form.take_files("images");

    let service = VehicleService::new(&state.db, state.storage.as_ref());
    let vehicle = service
        .update_with_images(user.id, id, params, deleted_image_ids, images)
        .await?;

    Ok((StatusCode::OK, Json(vehicle.into_dto())))
}

/// Builds the vehicle input from the text parts of the form.
fn vehicle_input(form: &MultipartForm) -> Result<VehicleInputDto, AppError> {
    Ok(VehicleInputDto {
        model_id: parse_id(form, "model_id")?,
        make_id: parse_id(form, "make_id")?,
        vin: form.text("vin").unwrap_or_default(),
        year: form.text("year").unwrap_or_default(),
        street: form.text("street").unwrap_or_default(),
        city: form.text("city").unwrap_or_default(),
        state: form.text("state").unwrap_or_default(),
        country: form.text("country").unwrap_or_default(),
        zipcode: form.text("zipcode").unwrap_or_default(),
        status: form.text("status"),
        location: form.text("location").unwrap_or_default(),
    })
}

fn parse_id(form: &MultipartForm, name: &str) -> Result<Option<i32>, AppError> {
    form.text(name)
        .map(|value| {
            value
                .parse::<i32>()
                .map_err(|_| AppError::BadRequest(format!("Invalid {}", name)))
        })
        .transpose()
}

/// Accepts `deletedImageIds` as repeated parts, a JSON array, or both.
fn deleted_image_ids(values: &[String]) -> Result<Vec<Uuid>, AppError> {
    let invalid = || AppError::BadRequest("Invalid deletedImageIds".to_string());
    let mut ids = Vec::new();

    for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        if value.starts_with('[') {
            let parsed: Vec<Uuid> = serde_json::from_str(value).map_err(|_| invalid())?;
            ids.extend(parsed);
        } else {
            ids.push(Uuid::parse_str(value).map_err(|_| invalid())?);
        }
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the JSON array form sent by the web client.
    #[test]
    fn test_deleted_image_ids_json_array() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let ids = deleted_image_ids(&[format!("[\"{}\",\"{}\"]", a, b)]).unwrap();

        assert_eq!(ids, vec![a, b]);
    }

    /// Tests repeated parts and blank values.
    #[test]
    fn test_deleted_image_ids_repeated() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let ids = deleted_image_ids(&[a.to_string(), " ".to_string(), b.to_string()]).unwrap();

        assert_eq!(ids, vec![a, b]);
    }

    /// Tests a value that is not a UUID.
    ///
    /// Expected: Err(BadRequest)
    #[test]
    fn test_deleted_image_ids_invalid() {
        let result = deleted_image_ids(&["not-a-uuid".to_string()]);

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
