//! Sign-in, token refresh and password reset.
//!
//! Sign-in checks the bcrypt hash and issues an access/refresh token pair. Password
//! resets are driven by a short-lived reset token mailed to the account owner.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::{
        auth::{ResetPasswordParams, SignInParams, TokenPair},
        user::User,
    },
    service::{
        mail::MailService,
        token::{TokenKind, TokenService},
    },
    util::{
        password::{hash_password, verify_password},
        validation::Validator,
    },
};

/// Service providing sign-in and password recovery.
pub struct AuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub tokens: &'a TokenService,
    pub mail: &'a MailService,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `tokens` - Token signer for access, refresh and reset tokens
    /// - `mail` - Mail service used for reset emails
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService, mail: &'a MailService) -> Self {
        Self { db, tokens, mail }
    }

    /// Authenticates a user by email and password.
    ///
    /// Unknown emails, wrong passwords and accounts that never accepted their
    /// invitation all fail with the same error so that sign-in does not reveal
    /// which accounts exist.
    ///
    /// # Arguments
    /// - `params` - Credentials and the remember-me flag
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - Access token (15 minutes) and refresh token (1 or 30 days)
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - Authentication failed
    /// - `Err(AppError::DbErr)` - Database error during lookup
    pub async fn sign_in(&self, params: SignInParams) -> Result<TokenPair, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_email(&params.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&params.password, &user.password_hash).await? || !user.is_verified {
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(TokenPair {
            access_token: self.tokens.issue_access(&user)?,
            refresh_token: self.tokens.issue_refresh(user.id, params.remember_me)?,
        })
    }

    /// Issues a new access token from a refresh token.
    ///
    /// Refresh tokens issued before a forced logout are rejected as well, so a forced
    /// logout ends every session of the user.
    ///
    /// # Returns
    /// - `Ok(String)` - New access token
    /// - `Err(AppError::AuthErr(_))` - Token missing, invalid, expired or revoked, or user gone
    pub async fn refresh(&self, refresh_token: Option<String>) -> Result<String, AppError> {
        let token = refresh_token
            .filter(|t| !t.trim().is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;

        // Lifetime only affects issuing; any refresh secret verification works.
        let claims = self
            .tokens
            .verify(TokenKind::Refresh { remember_me: false }, token.trim())
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let user = UserRepository::new(self.db)
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound(claims.sub))?;

        if TokenService::is_revoked(&claims, &user) {
            return Err(AuthError::SessionRevoked(user.id).into());
        }

        Ok(self.tokens.issue_access(&user)?)
    }

    /// Mails a password reset link if a verified account uses `email`.
    ///
    /// Unknown emails succeed silently; the caller always answers with the same
    /// neutral message.
    ///
    /// # Returns
    /// - `Ok(())` - Mail sent, or no account with that email
    /// - `Err(AppError::BadRequest)` - Account exists but was never activated
    /// - `Err(AppError::InternalErr(Mail))` - Mail delivery failed
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = UserRepository::new(self.db)
            .find_by_email(email.trim())
            .await?
        else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        if !user.is_verified {
            return Err(AppError::BadRequest("Account is not verified.".to_string()));
        }

        self.send_reset(&user).await
    }

    /// Mails a password reset link to the signed-in caller.
    pub async fn request_password_reset(&self, caller: &User) -> Result<(), AppError> {
        self.send_reset(caller).await
    }

    /// Sets a new password using an emailed reset token.
    ///
    /// # Returns
    /// - `Ok(())` - Password replaced
    /// - `Err(AppError::BadRequest)` - Passwords differ, or the account is not verified
    /// - `Err(AppError::Validation)` - Password breaks the password policy
    /// - `Err(AppError::AuthErr(InvalidResetToken))` - Token invalid or expired
    /// - `Err(AppError::NotFound)` - Token subject no longer exists
    pub async fn reset_password(&self, params: ResetPasswordParams) -> Result<(), AppError> {
        if params.password != params.confirm_password {
            return Err(AppError::BadRequest("Passwords do not match".to_string()));
        }

        let mut validator = Validator::new();
        validator.password("password", &params.password);
        validator.finish()?;

        let claims = self
            .tokens
            .verify(TokenKind::Reset, &params.token)
            .map_err(|_| AuthError::InvalidResetToken)?;

        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !user.is_verified {
            return Err(AppError::BadRequest("Account is not verified.".to_string()));
        }

        user_repo
            .update_password(user.id, hash_password(&params.password).await?)
            .await?;

        tracing::info!(user_id = %user.id, "Password reset");

        Ok(())
    }

    async fn send_reset(&self, user: &User) -> Result<(), AppError> {
        let token = self.tokens.issue_reset(user.id, &user.email)?;

        self.mail
            .send_password_reset(&user.email, user.greeting_name(), &token)
            .await
    }
}
