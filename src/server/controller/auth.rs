use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{
            ForgotPasswordDto, RefreshDto, RefreshResponseDto, ResetPasswordDto, SignInDto,
            SignInResponseDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::auth::{ResetPasswordParams, SignInParams},
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

const RESET_LINK_SENT: &str = "If an account with that email exists, a reset link has been sent.";

/// Sign in with email and password.
///
/// Returns a short-lived access token and a refresh token whose lifetime depends on
/// `rememberMe`.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Token pair
/// - `400 Bad Request` - Malformed credentials
/// - `401 Unauthorized` - Unknown email, wrong password or unverified account
#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = AUTH_TAG,
    request_body = SignInDto,
    security(()),
    responses(
        (status = 200, description = "Sign in successful", body = SignInResponseDto),
        (status = 400, description = "Malformed credentials", body = ErrorDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.tokens, &state.mail);

    let tokens = service.sign_in(SignInParams::from_dto(payload)).await?;

    Ok((StatusCode::OK, Json(tokens.into_dto())))
}

/// Exchange a refresh token for a new access token.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - New access token
/// - `401 Unauthorized` - Missing, invalid or revoked refresh token
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = AUTH_TAG,
    request_body = RefreshDto,
    security(()),
    responses(
        (status = 200, description = "New access token", body = RefreshResponseDto),
        (status = 401, description = "Invalid refresh token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.tokens, &state.mail);

    let new_access_token = service.refresh(payload.refresh_token).await?;

    Ok((StatusCode::OK, Json(RefreshResponseDto { new_access_token })))
}

/// Request a password reset email.
///
/// Answers with the same message whether or not the email belongs to an account.
///
/// # Access Control
/// - Public
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = AUTH_TAG,
    request_body = ForgotPasswordDto,
    security(()),
    responses(
        (status = 200, description = "Reset link sent if the account exists", body = MessageDto),
        (status = 400, description = "Account is not verified", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.tokens, &state.mail);

    service.forgot_password(&payload.email).await?;

    Ok((StatusCode::OK, Json(MessageDto::new(RESET_LINK_SENT))))
}

/// Set a new password with an emailed reset token.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Password replaced
/// - `400 Bad Request` - Passwords differ, weak password or unverified account
/// - `401 Unauthorized` - Invalid or expired reset token
/// - `404 Not Found` - Token subject no longer exists
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = AUTH_TAG,
    request_body = ResetPasswordDto,
    security(()),
    responses(
        (status = 200, description = "Password has been reset", body = MessageDto),
        (status = 400, description = "Invalid password", body = ErrorDto),
        (status = 401, description = "Invalid or expired reset token", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.tokens, &state.mail);

    service
        .reset_password(ResetPasswordParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Password has been reset successfully")),
    ))
}

/// Send a password reset email to the signed-in user.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    post,
    path = "/auth/request-password-reset",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Reset email sent", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn request_password_reset(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let service = AuthService::new(&state.db, &state.tokens, &state.mail);
    service.request_password_reset(&user).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new(
            "Password reset email has been sent to your email address.",
        )),
    ))
}
