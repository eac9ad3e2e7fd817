use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        make::{MakeDto, MakeIdDto, ModelIdDto, VehicleModelDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::make::{Make, VehicleModel},
        service::make::MakeService,
        state::AppState,
    },
};

/// Tag for grouping make and model endpoints in OpenAPI documentation
pub static MAKE_TAG: &str = "make";

#[derive(Deserialize)]
pub struct FindOrCreateMakeParams {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct FindOrCreateModelParams {
    pub name: Option<String>,
    pub make_id: Option<i32>,
}

/// List every make ordered by name.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    get,
    path = "/makes",
    tag = MAKE_TAG,
    responses(
        (status = 200, description = "All makes", body = Vec<MakeDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_makes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let makes = MakeService::new(&state.db).get_all().await?;

    Ok((
        StatusCode::OK,
        Json(makes.into_iter().map(Make::into_dto).collect::<Vec<_>>()),
    ))
}

/// Get a make by ID.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    get,
    path = "/makes/{id}",
    tag = MAKE_TAG,
    params(
        ("id" = i32, Path, description = "Make ID")
    ),
    responses(
        (status = 200, description = "The make", body = MakeDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Make not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_make(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let make = MakeService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(make.into_dto())))
}

/// Find a make by name, creating it when missing.
///
/// The name is normalized to title case before the lookup.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `200 OK` - ID of the existing or created make
/// - `400 Bad Request` - Name missing
#[utoipa::path(
    get,
    path = "/makes/find-or-create-make",
    tag = MAKE_TAG,
    params(
        ("name" = String, Query, description = "Make name in any casing")
    ),
    responses(
        (status = 200, description = "Make ID", body = MakeIdDto),
        (status = 400, description = "Make name is required", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn find_or_create_make(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<FindOrCreateMakeParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let make = MakeService::new(&state.db)
        .find_or_create_make(params.name.as_deref().unwrap_or_default())
        .await?;

    Ok((StatusCode::OK, Json(MakeIdDto { make_id: make.id })))
}

/// List the models of a make.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    get,
    path = "/models/bymake/{make_id}",
    tag = MAKE_TAG,
    params(
        ("make_id" = i32, Path, description = "Make ID")
    ),
    responses(
        (status = 200, description = "Models of the make", body = Vec<VehicleModelDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_models_by_make(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(make_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let models = MakeService::new(&state.db).get_models(make_id).await?;

    Ok((
        StatusCode::OK,
        Json(
            models
                .into_iter()
                .map(VehicleModel::into_dto)
                .collect::<Vec<_>>(),
        ),
    ))
}

/// Find a model of a make by name, creating it when missing.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `200 OK` - ID of the existing or created model
/// - `400 Bad Request` - Name or make ID missing
/// - `404 Not Found` - The make does not exist
#[utoipa::path(
    get,
    path = "/models/find-or-create-model",
    tag = MAKE_TAG,
    params(
        ("name" = String, Query, description = "Model name in any casing"),
        ("make_id" = i32, Query, description = "Make the model belongs to")
    ),
    responses(
        (status = 200, description = "Model ID", body = ModelIdDto),
        (status = 400, description = "Model name and make_id are required", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Make not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn find_or_create_model(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<FindOrCreateModelParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let Some(make_id) = params.make_id else {
        return Err(AppError::BadRequest(
            "Model name and make_id are required".to_string(),
        ));
    };

    let model = MakeService::new(&state.db)
        .find_or_create_model(params.name.as_deref().unwrap_or_default(), make_id)
        .await?;

    Ok((StatusCode::OK, Json(ModelIdDto { model_id: model.id })))
}
