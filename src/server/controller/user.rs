use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{
            ActivateUserDto, ActivateUserResponseDto, CreateUserDto, InvitedUserDto,
            PaginatedUsersDto, UpdateProfileDto, UserDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::user::{ActivateUserParams, CreateUserParams, GetUsersParams, UpdateProfileParams},
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

#[derive(Deserialize)]
pub struct UserListParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub search: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

#[derive(Deserialize)]
pub struct VerifyParams {
    pub token: Option<String>,
}

/// Invite a new user.
///
/// Creates an unverified account and emails an activation link to it.
///
/// # Access Control
/// - `SuperAdmin` - Only super admins can invite users
///
/// # Returns
/// - `201 Created` - The invited user
/// - `400 Bad Request` - Invalid email or phone number
/// - `403 Forbidden` - Caller is not a super admin
/// - `409 Conflict` - Email already in use
#[utoipa::path(
    post,
    path = "/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Invalid user data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a super admin", body = ErrorDto),
        (status = 409, description = "Email already in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::SuperAdmin])
        .await?;

    let service = UserService::new(&state.db, &state.tokens, &state.mail);
    let user = service.create_user(CreateUserParams::from_dto(payload)).await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// List users other than the caller, newest first.
///
/// # Access Control
/// - Authenticated
///
/// # Arguments
/// - `params` - Page (1-based), page size and an optional search on email or role
#[utoipa::path(
    get,
    path = "/users",
    tag = USER_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10)"),
        ("search" = Option<String>, Query, description = "Matches email or role")
    ),
    responses(
        (status = 200, description = "Page of users", body = PaginatedUsersDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let service = UserService::new(&state.db, &state.tokens, &state.mail);
    let users = service
        .get_users(GetUsersParams {
            exclude_user_id: caller.id,
            page: params.page.max(1),
            limit: params.limit.max(1),
            search: params.search.filter(|s| !s.trim().is_empty()),
        })
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// Get the signed-in user's profile.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    get,
    path = "/users/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Caller's profile", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(caller.into_dto())))
}

/// Delete a user and notify them by email.
///
/// # Access Control
/// - `SuperAdmin` - Only super admins can delete users
///
/// # Returns
/// - `200 OK` - User deleted
/// - `400 Bad Request` - Caller tried to delete their own account
/// - `404 Not Found` - No user with that id
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageDto),
        (status = 400, description = "Cannot delete own account", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a super admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::SuperAdmin])
        .await?;

    let service = UserService::new(&state.db, &state.tokens, &state.mail);
    service.delete_user(caller.id, id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("User deleted successfully"))))
}

/// Revoke every token issued to a user so far.
///
/// # Access Control
/// - `SuperAdmin` - Only super admins can force a logout
#[utoipa::path(
    post,
    path = "/users/{id}/force-logout",
    tag = USER_TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User logged out", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a super admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn force_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::SuperAdmin])
        .await?;

    let service = UserService::new(&state.db, &state.tokens, &state.mail);
    service.force_logout(id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("User has been logged out from all sessions")),
    ))
}

/// Check an invitation token and return who it was issued to.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/users/verify",
    tag = USER_TAG,
    params(
        ("token" = Option<String>, Query, description = "Invitation token from the activation email")
    ),
    security(()),
    responses(
        (status = 200, description = "Invited user", body = InvitedUserDto),
        (status = 401, description = "Invalid or expired token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Result<impl IntoResponse, AppError> {
    let service = UserService::new(&state.db, &state.tokens, &state.mail);

    let invited = service.verify_invitation(params.token.as_deref()).await?;

    Ok((StatusCode::OK, Json(invited.into_dto())))
}

/// Accept an invitation by setting a name and password.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Account activated, with the sign-in path to redirect to
/// - `400 Bad Request` - Missing fields, weak or mismatched password
/// - `401 Unauthorized` - Token invalid, expired or issued for another email
/// - `404 Not Found` - No account with that email
/// - `409 Conflict` - Account already activated
#[utoipa::path(
    patch,
    path = "/users/activate",
    tag = USER_TAG,
    request_body = ActivateUserDto,
    security(()),
    responses(
        (status = 200, description = "Account activated", body = ActivateUserResponseDto),
        (status = 400, description = "Invalid activation data", body = ErrorDto),
        (status = 401, description = "Invalid or expired token", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Account already activated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn activate(
    State(state): State<AppState>,
    Json(payload): Json<ActivateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = UserService::new(&state.db, &state.tokens, &state.mail);

    service
        .activate(ActivateUserParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ActivateUserResponseDto {
            message: "Account activated successfully.".to_string(),
            redirect_url: "/auth/signin".to_string(),
        }),
    ))
}

/// Update the signed-in user's name or phone number.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    patch,
    path = "/users",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = UserDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let service = UserService::new(&state.db, &state.tokens, &state.mail);
    let user = service
        .update_profile(caller.id, UpdateProfileParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
