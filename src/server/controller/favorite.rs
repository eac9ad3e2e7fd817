use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        vehicle::{FavoriteRequestDto, VehicleDetailDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::vehicle::VehicleDetail,
        service::favorite::FavoriteService, state::AppState,
    },
};

/// Tag for grouping favorite endpoints in OpenAPI documentation
pub static FAVORITE_TAG: &str = "favorite";

/// Add a vehicle to the caller's favorites.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    post,
    path = "/favorites",
    tag = FAVORITE_TAG,
    request_body = FavoriteRequestDto,
    responses(
        (status = 200, description = "Vehicle added to favorites", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 409, description = "Vehicle is already in favorites", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<FavoriteRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    FavoriteService::new(&state.db)
        .add(user.id, payload.vehicle_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Vehicle added to favorites")),
    ))
}

/// Remove a vehicle from the caller's favorites.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    delete,
    path = "/favorites",
    tag = FAVORITE_TAG,
    request_body = FavoriteRequestDto,
    responses(
        (status = 200, description = "Vehicle removed from favorites", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<FavoriteRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    FavoriteService::new(&state.db)
        .remove(user.id, payload.vehicle_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Vehicle removed from favorites")),
    ))
}

/// List the caller's favorite vehicles.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    get,
    path = "/favorites",
    tag = FAVORITE_TAG,
    responses(
        (status = 200, description = "Favorite vehicles", body = Vec<VehicleDetailDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_favorites(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let favorites = FavoriteService::new(&state.db).list(user.id).await?;

    Ok((
        StatusCode::OK,
        Json(
            favorites
                .into_iter()
                .map(VehicleDetail::into_dto)
                .collect::<Vec<_>>(),
        ),
    ))
}
