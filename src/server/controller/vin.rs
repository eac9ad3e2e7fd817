use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{api::ErrorDto, vin::DecodedVinDto},
    server::{
        error::AppError, middleware::auth::AuthGuard, service::vin::VinService, state::AppState,
    },
};

/// Tag for grouping VIN endpoints in OpenAPI documentation
pub static VIN_TAG: &str = "vin";

#[derive(Deserialize)]
pub struct DecodeVinParams {
    pub vin: Option<String>,
}

/// Decode a VIN into make, model and year.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `200 OK` - Decoded vehicle
/// - `400 Bad Request` - Malformed VIN or no data for it
/// - `500 Internal Server Error` - Decoder unreachable
#[utoipa::path(
    get,
    path = "/vin",
    tag = VIN_TAG,
    params(
        ("vin" = String, Query, description = "17-character VIN")
    ),
    responses(
        (status = 200, description = "Decoded vehicle", body = DecodedVinDto),
        (status = 400, description = "Invalid VIN or no data found", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn decode_vin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<DecodeVinParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let service = VinService::new(&state.db, &state.http_client, &state.apis.nhtsa_api_url);
    let decoded = service
        .decode(params.vin.as_deref().unwrap_or_default())
        .await?;

    Ok((StatusCode::OK, Json(decoded.into_dto())))
}
