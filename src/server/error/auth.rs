use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no `Authorization: Bearer` header.
    #[error("No token provided")]
    MissingToken,

    /// Access token failed signature or expiry validation.
    #[error("Invalid token")]
    InvalidToken,

    /// Token verified but its subject no longer exists.
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    /// Access token was issued before the user's forced logout.
    #[error("Session revoked for user {0}")]
    SessionRevoked(Uuid),

    /// User is authenticated but lacks the required role.
    ///
    /// The string describes the attempted action and is only logged.
    #[error("User {0} denied access: {1}")]
    AccessDenied(Uuid, String),

    /// Unknown email, wrong password or unverified account at sign-in.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No refresh token provided")]
    MissingRefreshToken,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    /// Invitation token could not be verified or has no pending user.
    #[error("Invalid or expired token")]
    InvalidVerificationToken,

    #[error("Invalid or expired activation token")]
    InvalidActivationToken,

    /// Activation token was issued for a different email address.
    #[error("Activation token does not match email")]
    ActivationEmailMismatch,
}

/// Converts authentication errors into HTTP responses.
///
/// Maps authentication errors to appropriate HTTP status codes and client-facing messages:
/// - `AccessDenied` → 403 Forbidden with "Insufficient permissions"
/// - `UserNotFound` → 401 Unauthorized with "User not found"
/// - `SessionRevoked` → 401 Unauthorized with "Session revoked"
/// - Every other variant → 401 Unauthorized with its display message
///
/// Errors carrying a user id are logged at debug level; the id is never echoed
/// to the client.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "Insufficient permissions".to_string(),
            ),
            Self::UserNotFound(_) => (StatusCode::UNAUTHORIZED, "User not found".to_string()),
            Self::SessionRevoked(_) => (StatusCode::UNAUTHORIZED, "Session revoked".to_string()),
            err => (StatusCode::UNAUTHORIZED, err.to_string()),
        };

        (status, Json(ErrorDto::new(message))).into_response()
    }
}
