use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{analytics::AnalyticsDto, api::ErrorDto},
    server::{
        error::AppError, middleware::auth::AuthGuard, service::analytics::AnalyticsService,
        state::AppState,
    },
};

/// Tag for grouping analytics endpoints in OpenAPI documentation
pub static ANALYTICS_TAG: &str = "analytics";

/// Inventory and customer totals for the dashboard.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    get,
    path = "/analytics",
    tag = ANALYTICS_TAG,
    responses(
        (status = 200, description = "Dashboard totals", body = AnalyticsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let summary = AnalyticsService::new(&state.db).summary().await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}
