use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        customer::{CustomerDto, CustomerInputDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::customer::{Customer, CustomerParams},
        service::customer::CustomerService,
        state::AppState,
    },
};

/// Tag for grouping customer endpoints in OpenAPI documentation
pub static CUSTOMER_TAG: &str = "customer";

#[derive(Deserialize)]
pub struct SuggestParams {
    pub email: Option<String>,
}

/// Suggest customers whose email contains the given fragment.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `200 OK` - Matching customers
/// - `400 Bad Request` - `email` missing
#[utoipa::path(
    get,
    path = "/customers/suggest",
    tag = CUSTOMER_TAG,
    params(
        ("email" = String, Query, description = "Email fragment")
    ),
    responses(
        (status = 200, description = "Matching customers", body = Vec<CustomerDto>),
        (status = 400, description = "Missing email", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn suggest_customers(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SuggestParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let customers = CustomerService::new(&state.db)
        .suggest(params.email.as_deref())
        .await?;

    Ok((
        StatusCode::OK,
        Json(
            customers
                .into_iter()
                .map(Customer::into_dto)
                .collect::<Vec<_>>(),
        ),
    ))
}

/// Create a customer, or update the one already using the email.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `201 Created` - A new customer was created
/// - `200 OK` - The existing customer was updated
/// - `400 Bad Request` - Invalid customer fields
#[utoipa::path(
    post,
    path = "/customers",
    tag = CUSTOMER_TAG,
    request_body = CustomerInputDto,
    responses(
        (status = 201, description = "Customer created", body = CustomerDto),
        (status = 200, description = "Customer updated", body = CustomerDto),
        (status = 400, description = "Invalid customer data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_or_update_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CustomerInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let params = CustomerParams::from_dto(payload)?;

    let (customer, created) = CustomerService::new(&state.db)
        .create_or_update(params)
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(customer.into_dto())))
}

/// List every customer.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    get,
    path = "/customers",
    tag = CUSTOMER_TAG,
    responses(
        (status = 200, description = "All customers", body = Vec<CustomerDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_customers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let customers = CustomerService::new(&state.db).get_all().await?;

    Ok((
        StatusCode::OK,
        Json(
            customers
                .into_iter()
                .map(Customer::into_dto)
                .collect::<Vec<_>>(),
        ),
    ))
}
