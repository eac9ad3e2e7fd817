//! JSON Web Token issuing and verification.
//!
//! Four token kinds are signed with separate secrets: short-lived access tokens,
//! refresh tokens, invitation (verification) tokens and password reset tokens.
//! Access tokens issued before a user's `force_logout_at` are treated as revoked.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::server::{
    config::Config,
    model::user::{role_name, User},
};

/// Kind of token, selecting both the signing secret and the lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh { remember_me: bool },
    Verification,
    Reset,
}

impl TokenKind {
    pub fn lifetime(&self) -> Duration {
        match self {
            Self::Access => Duration::minutes(15),
            Self::Refresh { remember_me: true } => Duration::days(30),
            Self::Refresh { remember_me: false } => Duration::days(1),
            Self::Verification => Duration::days(1),
            Self::Reset => Duration::minutes(10),
        }
    }
}

/// Claims carried by every token kind.
///
/// `email` is set on access, verification and reset tokens; `role` only on access tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies tokens. Cloned into the application state.
#[derive(Clone)]
pub struct TokenService {
    access_secret: String,
    refresh_secret: String,
    verification_secret: String,
    reset_secret: String,
}

impl TokenService {
    pub fn new(
        access_secret: String,
        refresh_secret: String,
        verification_secret: String,
        reset_secret: String,
    ) -> Self {
        Self {
            access_secret,
            refresh_secret,
            verification_secret,
            reset_secret,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_secret.clone(),
            config.jwt_refresh_secret.clone(),
            config.verification_token_secret.clone(),
            config.reset_password_token_secret.clone(),
        )
    }

    fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.access_secret.as_bytes(),
            TokenKind::Refresh { .. } => self.refresh_secret.as_bytes(),
            TokenKind::Verification => self.verification_secret.as_bytes(),
            TokenKind::Reset => self.reset_secret.as_bytes(),
        }
    }

    /// Signs `claims` with the secret of `kind`.
    pub fn sign(
        &self,
        kind: TokenKind,
        claims: &Claims,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret(kind)),
        )
    }

    fn issue(
        &self,
        kind: TokenKind,
        sub: Uuid,
        email: Option<String>,
        role: Option<String>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub,
            email,
            role,
            iat: now.timestamp(),
            exp: (now + kind.lifetime()).timestamp(),
        };

        self.sign(kind, &claims)
    }

    /// Issues a 15 minute access token carrying the user's email and role.
    pub fn issue_access(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(
            TokenKind::Access,
            user.id,
            Some(user.email.clone()),
            Some(role_name(user.role).to_string()),
        )
    }

    pub fn issue_refresh(
        &self,
        user_id: Uuid,
        remember_me: bool,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(TokenKind::Refresh { remember_me }, user_id, None, None)
    }

    /// Issues the invitation token embedded in the activation link.
    pub fn issue_verification(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(
            TokenKind::Verification,
            user_id,
            Some(email.to_string()),
            None,
        )
    }

    pub fn issue_reset(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(TokenKind::Reset, user_id, Some(email.to_string()), None)
    }

    /// Verifies signature and expiry of a token of the given kind.
    ///
    /// Expiry is exact: a token is rejected from the second after `exp`.
    pub fn verify(
        &self,
        kind: TokenKind,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret(kind)),
            &validation,
        )?;

        Ok(data.claims)
    }

    /// Whether the token was issued before the user was forcibly logged out.
    pub fn is_revoked(claims: &Claims, user: &User) -> bool {
        user.force_logout_at
            .is_some_and(|at| claims.iat < at.timestamp())
    }
}
