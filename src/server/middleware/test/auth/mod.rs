use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::UserRole;
use uuid::Uuid;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    model::user::User,
    service::token::{Claims, TokenKind, TokenService},
};
use test_utils::{builder::TestBuilder, factory};

mod require;

fn tokens() -> TokenService {
    TokenService::new(
        "access-secret".to_string(),
        "refresh-secret".to_string(),
        "verification-secret".to_string(),
        "reset-secret".to_string(),
    )
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

fn access_token(tokens: &TokenService, user: entity::user::Model) -> String {
    tokens.issue_access(&User::from_entity(user)).unwrap()
}
