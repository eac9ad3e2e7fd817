use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::User,
    service::token::{TokenKind, TokenService},
};

pub enum Permission {
    SuperAdmin,
}

/// Authenticates a request from its `Authorization: Bearer <access token>` header.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService, headers: &'a HeaderMap) -> Self {
        Self { db, tokens, headers }
    }

    /// Resolves the calling user and checks every permission in `permissions`.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user holding every permission
    /// - `Err(AuthError::MissingToken)` - No bearer token
    /// - `Err(AuthError::InvalidToken)` - Bad signature or expired token
    /// - `Err(AuthError::UserNotFound)` - Token subject no longer exists
    /// - `Err(AuthError::SessionRevoked)` - Token issued before a forced logout
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(token) = bearer_token(self.headers) else {
            return Err(AuthError::MissingToken.into());
        };

        let claims = self
            .tokens
            .verify(TokenKind::Access, token)
            .map_err(|_| AuthError::InvalidToken)?;

        let Some(user) = UserRepository::new(self.db).find_by_id(claims.sub).await? else {
            return Err(AuthError::UserNotFound(claims.sub).into());
        };

        if TokenService::is_revoked(&claims, &user) {
            return Err(AuthError::SessionRevoked(user.id).into());
        }

        for permission in permissions {
            match permission {
                Permission::SuperAdmin => {
                    if !user.is_super_admin() {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "User attempted a super admin action without the SUPER_ADMIN role"
                                .to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
