//! Authentication parameters and results.

use crate::model::auth::{ResetPasswordDto, SignInDto, SignInResponseDto};

#[derive(Debug, Clone)]
pub struct SignInParams {
    pub email: String,
    pub password: String,
    /// Extends the refresh token lifetime from 1 to 30 days.
    pub remember_me: bool,
}

impl SignInParams {
    pub fn from_dto(dto: SignInDto) -> Self {
        Self {
            email: dto.email.trim().to_string(),
            password: dto.password,
            remember_me: dto.remember_me,
        }
    }
}

/// Access and refresh token issued at sign-in.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn into_dto(self) -> SignInResponseDto {
        SignInResponseDto {
            message: "Sign in successful".to_string(),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResetPasswordParams {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordParams {
    pub fn from_dto(dto: ResetPasswordDto) -> Self {
        Self {
            token: dto.token.trim().to_string(),
            password: dto.password,
            confirm_password: dto.confirm_password,
        }
    }
}
