//! User service for business logic.
//!
//! This module provides the `UserService` for managing back-office accounts. Super
//! admins invite users by email; an invited account stays unverified with an unusable
//! password until the invitee activates it through the emailed link.

use chrono::Utc;
use entity::sea_orm_active_enums::UserRole;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{
        ActivateUserParams, CreateUserParams, GetUsersParams, InvitedUser, NewUserParams,
        PaginatedUsers, UpdateProfileParams, User,
    },
    service::{
        mail::MailService,
        make::is_unique_violation,
        token::{TokenKind, TokenService},
    },
    util::{
        password::{hash_password, random_password},
        validation::{is_valid_email, is_valid_invite_phone, is_valid_profile_phone, Validator},
    },
};

/// Service providing business logic for user management.
pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
    pub tokens: &'a TokenService,
    pub mail: &'a MailService,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `tokens` - Token signer for invitation tokens
    /// - `mail` - Mail service for invitation and account deleted emails
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService, mail: &'a MailService) -> Self {
        Self { db, tokens, mail }
    }

    /// Invites a new user.
    ///
    /// Creates an unverified account with a random password and mails an activation
    /// link carrying a verification token valid for one day.
    ///
    /// # Arguments
    /// - `params` - Email, names and phone number of the invitee
    ///
    /// # Returns
    /// - `Ok(User)` - The created account
    /// - `Err(AppError::Validation)` - Missing or malformed fields
    /// - `Err(AppError::Conflict)` - Email already in use
    /// - `Err(AppError::InternalErr(Mail))` - Invitation could not be sent; no account is kept
    pub async fn create_user(&self, params: CreateUserParams) -> Result<User, AppError> {
        let mut validator = Validator::new();
        validator
            .required("email", &params.email, "Email is required")
            .check("email", is_valid_email(&params.email), "A valid email is required")
            .required("firstName", &params.first_name, "First name is required.")
            .required("lastName", &params.last_name, "Last name is required.")
            .required("phoneNumber", &params.phone_number, "Phone Number is required")
            .check(
                "phoneNumber",
                is_valid_invite_phone(&params.phone_number),
                "Enter a valid phone number",
            );
        validator.finish()?;

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_email(&params.email).await?.is_some() {
            return Err(email_taken());
        }

        let password_hash = hash_password(&random_password()).await?;

        // The row only persists once the invitation is on its way.
        let txn = self.db.begin().await?;

        let user = UserRepository::new(&txn)
            .create(NewUserParams {
                email: params.email,
                password_hash,
                role: UserRole::User,
                first_name: Some(params.first_name),
                last_name: Some(params.last_name),
                phone_number: Some(params.phone_number),
                is_verified: false,
            })
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    email_taken()
                } else {
                    err.into()
                }
            })?;

        let token = self.tokens.issue_verification(user.id, &user.email)?;
        self.mail
            .send_verification(&user.email, user.greeting_name(), &token)
            .await?;

        txn.commit().await?;

        tracing::info!(user_id = %user.id, "User invited");

        Ok(user)
    }

    /// Lists users other than the caller, newest first.
    ///
    /// # Returns
    /// - `Ok(PaginatedUsers)` - Users for the page with the total matching count
    /// - `Err(AppError::DbErr)` - Database error during pagination query
    pub async fn get_users(&self, params: GetUsersParams) -> Result<PaginatedUsers, AppError> {
        let (users, total) = UserRepository::new(self.db).get_paginated(&params).await?;

        Ok(PaginatedUsers { users, total })
    }

    /// Gets a user by id.
    ///
    /// # Returns
    /// - `Ok(User)` - User found
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(user_not_found)
    }

    /// Deletes a user and notifies them by email.
    ///
    /// The deletion stands even when the notification cannot be sent.
    ///
    /// # Arguments
    /// - `caller_id` - Super admin performing the deletion
    /// - `id` - User to delete
    ///
    /// # Returns
    /// - `Ok(())` - User deleted
    /// - `Err(AppError::BadRequest)` - Caller tried to delete their own account
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn delete_user(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if caller_id == id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        let user_repo = UserRepository::new(self.db);
        let user = user_repo.find_by_id(id).await?.ok_or_else(user_not_found)?;

        if !user_repo.delete(id).await? {
            return Err(user_not_found());
        }

        tracing::info!(user_id = %id, deleted_by = %caller_id, "User deleted");

        if let Err(err) = self
            .mail
            .send_account_deleted(&user.email, user.greeting_name())
            .await
        {
            tracing::warn!(user_id = %id, "Failed to send account deleted email: {}", err);
        }

        Ok(())
    }

    /// Revokes every access and refresh token issued to a user so far.
    ///
    /// # Returns
    /// - `Ok(())` - Logout timestamp recorded
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn force_logout(&self, id: Uuid) -> Result<(), AppError> {
        let user_repo = UserRepository::new(self.db);
        user_repo.find_by_id(id).await?.ok_or_else(user_not_found)?;

        user_repo.set_force_logout(id, Utc::now()).await?;

        tracing::info!(user_id = %id, "User logged out from all sessions");

        Ok(())
    }

    /// Resolves an invitation token to the invitee's name and email.
    ///
    /// # Returns
    /// - `Ok(InvitedUser)` - Token valid and the user exists with a first name
    /// - `Err(AppError::AuthErr(InvalidVerificationToken))` - Any other outcome
    pub async fn verify_invitation(&self, token: Option<&str>) -> Result<InvitedUser, AppError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::InvalidVerificationToken)?;

        let claims = self
            .tokens
            .verify(TokenKind::Verification, token)
            .map_err(|_| AuthError::InvalidVerificationToken)?;

        let user = UserRepository::new(self.db)
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::InvalidVerificationToken)?;

        let name = user
            .first_name
            .filter(|n| !n.trim().is_empty())
            .ok_or(AuthError::InvalidVerificationToken)?;

        Ok(InvitedUser {
            name,
            email: user.email,
        })
    }

    /// Accepts an invitation: sets the chosen name and password and verifies the account.
    ///
    /// # Returns
    /// - `Ok(())` - Account activated
    /// - `Err(AppError::Validation)` - Missing fields, weak or mismatched password
    /// - `Err(AppError::AuthErr(_))` - Token invalid, expired, or issued for another email
    /// - `Err(AppError::NotFound)` - No account with that email
    /// - `Err(AppError::Conflict)` - Account already activated
    pub async fn activate(&self, params: ActivateUserParams) -> Result<(), AppError> {
        let mut validator = Validator::new();
        validator
            .required("name", &params.name, "Name is required.")
            .required("email", &params.email, "Email is required.")
            .check("email", is_valid_email(&params.email), "Enter a valid email address.")
            .password("password", &params.password)
            .required(
                "confirmPassword",
                &params.confirm_password,
                "Confirm Password is required.",
            )
            .check(
                "confirmPassword",
                params.confirm_password == params.password,
                "Passwords do not match.",
            )
            .required("token", &params.token, "Activation token is required.");
        validator.finish()?;

        let claims = self
            .tokens
            .verify(TokenKind::Verification, &params.token)
            .map_err(|_| AuthError::InvalidActivationToken)?;

        if !claims
            .email
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case(&params.email))
        {
            return Err(AuthError::ActivationEmailMismatch.into());
        }

        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .find_by_email(&params.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

        if user.is_verified {
            return Err(AppError::Conflict(
                "An account with this email already exists.".to_string(),
            ));
        }

        user_repo
            .activate(user.id, params.name, hash_password(&params.password).await?)
            .await?;

        tracing::info!(user_id = %user.id, "Account activated");

        Ok(())
    }

    /// Updates the caller's own profile.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(AppError::Validation)` - A present field is empty or the phone is malformed
    /// - `Err(AppError::NotFound)` - The caller no longer exists
    pub async fn update_profile(
        &self,
        id: Uuid,
        params: UpdateProfileParams,
    ) -> Result<User, AppError> {
        let mut validator = Validator::new();
        if let Some(first_name) = &params.first_name {
            validator.required("firstName", first_name, "First name cannot be empty");
        }
        if let Some(last_name) = &params.last_name {
            validator.required("lastName", last_name, "Last name cannot be empty");
        }
        if let Some(phone) = &params.phone_number {
            validator
                .required("phoneNumber", phone, "Phone Number cannot be empty")
                .check(
                    "phoneNumber",
                    is_valid_profile_phone(phone),
                    "Enter a valid Phone Number",
                );
        }
        validator.finish()?;

        UserRepository::new(self.db)
            .update_profile(id, params)
            .await?
            .ok_or_else(user_not_found)
    }
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

fn email_taken() -> AppError {
    AppError::Conflict("User with this email already exists".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{
        service::mail::{FailingMailer, RecordingMailer},
        util::password::verify_password,
    };
    use entity::prelude::User as UserEntity;
    use std::sync::Arc;
    use test_utils::{builder::TestBuilder, factory::user::UserFactory};

    struct Harness {
        tokens: TokenService,
        mail: MailService,
        mailer: RecordingMailer,
    }

    fn harness() -> Harness {
        let mailer = RecordingMailer::default();
        Harness {
            tokens: TokenService::new(
                "access".to_string(),
                "refresh".to_string(),
                "verification".to_string(),
                "reset".to_string(),
            ),
            mail: MailService::new(Arc::new(mailer.clone()), "http://front".to_string()),
            mailer,
        }
    }

    fn invite(email: &str) -> CreateUserParams {
        CreateUserParams {
            email: email.to_string(),
            first_name: "Ani".to_string(),
            last_name: "Petrosyan".to_string(),
            phone_number: "+37477123456".to_string(),
        }
    }

    fn activation(email: &str, token: String) -> ActivateUserParams {
        ActivateUserParams {
            name: "Ani".to_string(),
            email: email.to_string(),
            password: "Secret123!".to_string(),
            confirm_password: "Secret123!".to_string(),
            token,
        }
    }

    /// Tests inviting a user.
    ///
    /// Expected: unverified USER account and an invitation mail with an activation link
    #[tokio::test]
    async fn test_create_user_sends_invitation() {
        let test = TestBuilder::new().with_table(UserEntity).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let h = harness();

        let user = UserService::new(db, &h.tokens, &h.mail)
            .create_user(invite("new@dealer.com"))
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::User);
        assert!(!user.is_verified);

        let sent = h.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "new@dealer.com");
        assert!(sent[0].html.contains("http://front/activate?token="));
    }

    /// Tests inviting a user when the invitation cannot be delivered.
    ///
    /// Expected: Err(InternalErr) and no account left behind, so a retry can succeed
    #[tokio::test]
    async fn test_create_user_rolls_back_when_mail_fails() {
        let test = TestBuilder::new().with_table(UserEntity).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let h = harness();
        let failing = MailService::new(Arc::new(FailingMailer), "http://front".to_string());

        let result = UserService::new(db, &h.tokens, &failing)
            .create_user(invite("new@dealer.com"))
            .await;

        assert!(matches!(result, Err(AppError::InternalErr(_))));
        assert!(UserRepository::new(db)
            .find_by_email("new@dealer.com")
            .await
            .unwrap()
            .is_none());

        UserService::new(db, &h.tokens, &h.mail)
            .create_user(invite("new@dealer.com"))
            .await
            .unwrap();
        assert_eq!(h.mailer.sent().len(), 1);
    }

    /// Tests inviting an email that is already registered.
    ///
    /// Expected: Err(Conflict) and no mail
    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let test = TestBuilder::new().with_table(UserEntity).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        UserFactory::new(db)
            .email("taken@dealer.com")
            .build()
            .await
            .unwrap();
        let h = harness();

        let result = UserService::new(db, &h.tokens, &h.mail)
            .create_user(invite("TAKEN@dealer.com"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert!(h.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_create_user_validates_fields() {
        let test = TestBuilder::new().with_table(UserEntity).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let h = harness();

        let result = UserService::new(db, &h.tokens, &h.mail)
            .create_user(CreateUserParams {
                phone_number: "0123".to_string(),
                ..invite("not-an-email")
            })
            .await;

        match result {
            Err(AppError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["email", "phoneNumber"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    /// Tests deleting a user.
    ///
    /// Expected: user removed and an account deleted mail sent
    #[tokio::test]
    async fn test_delete_user_notifies_user() {
        let test = TestBuilder::new().with_table(UserEntity).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let admin = test_utils::factory::create_admin(db).await.unwrap();
        let user = UserFactory::new(db)
            .email("gone@dealer.com")
            .build()
            .await
            .unwrap();
        let h = harness();
        let service = UserService::new(db, &h.tokens, &h.mail);

        service.delete_user(admin.id, user.id).await.unwrap();

        assert!(matches!(service.get_user(user.id).await, Err(AppError::NotFound(_))));
        assert_eq!(h.mailer.sent()[0].to, "gone@dealer.com");
    }

    /// Tests the delete guards.
    ///
    /// Expected: self-deletion is a bad request, unknown ids are not found
    #[tokio::test]
    async fn test_delete_user_guards() {
        let test = TestBuilder::new().with_table(UserEntity).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let admin = test_utils::factory::create_admin(db).await.unwrap();
        let h = harness();
        let service = UserService::new(db, &h.tokens, &h.mail);

        assert!(matches!(
            service.delete_user(admin.id, admin.id).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.delete_user(admin.id, Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    /// Tests that force logout revokes earlier tokens.
    #[tokio::test]
    async fn test_force_logout_sets_timestamp() {
        let test = TestBuilder::new().with_table(UserEntity).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = test_utils::factory::create_user(db).await.unwrap();
        let h = harness();
        let service = UserService::new(db, &h.tokens, &h.mail);

        service.force_logout(user.id).await.unwrap();

        let stored = service.get_user(user.id).await.unwrap();
        assert!(stored.force_logout_at.is_some());
        assert!(matches!(
            service.force_logout(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    /// Tests resolving an invitation token.
    ///
    /// Expected: invitee name and email; garbage tokens are rejected
    #[tokio::test]
    async fn test_verify_invitation() {
        let test = TestBuilder::new().with_table(UserEntity).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = UserFactory::new(db)
            .email("invited@dealer.com")
            .first_name(Some("Ani".to_string()))
            .verified(false)
            .build()
            .await
            .unwrap();
        let h = harness();
        let service = UserService::new(db, &h.tokens, &h.mail);

        let token = h.tokens.issue_verification(user.id, &user.email).unwrap();
        let invited = service.verify_invitation(Some(&token)).await.unwrap();

        assert_eq!(invited.name, "Ani");
        assert_eq!(invited.email, "invited@dealer.com");
        assert!(matches!(
            service.verify_invitation(Some("garbage")).await,
            Err(AppError::AuthErr(AuthError::InvalidVerificationToken))
        ));
        assert!(matches!(
            service.verify_invitation(None).await,
            Err(AppError::AuthErr(AuthError::InvalidVerificationToken))
        ));
    }

    /// Tests activating an invited account.
    ///
    /// Expected: verified account with the new name and password; a second activation conflicts
    #[tokio::test]
    async fn test_activate_account() {
        let test = TestBuilder::new().with_table(UserEntity).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = UserFactory::new(db)
            .email("invited@dealer.com")
            .first_name(None)
            .verified(false)
            .build()
            .await
            .unwrap();
        let h = harness();
        let service = UserService::new(db, &h.tokens, &h.mail);
        let token = h.tokens.issue_verification(user.id, &user.email).unwrap();

        service
            .activate(activation("invited@dealer.com", token.clone()))
            .await
            .unwrap();

        let stored = service.get_user(user.id).await.unwrap();
        assert!(stored.is_verified);
        assert_eq!(stored.first_name.as_deref(), Some("Ani"));
        assert!(verify_password("Secret123!", &stored.password_hash).await.unwrap());

        assert!(matches!(
            service.activate(activation("invited@dealer.com", token)).await,
            Err(AppError::Conflict(_))
        ));
    }

    /// Tests activation with a token issued for another address.
    ///
    /// Expected: Err(AuthErr(ActivationEmailMismatch))
    #[tokio::test]
    async fn test_activate_rejects_email_mismatch() {
        let test = TestBuilder::new().with_table(UserEntity).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = UserFactory::new(db)
            .email("invited@dealer.com")
            .verified(false)
            .build()
            .await
            .unwrap();
        let h = harness();
        let token = h.tokens.issue_verification(user.id, &user.email).unwrap();

        let result = UserService::new(db, &h.tokens, &h.mail)
            .activate(activation("other@dealer.com", token))
            .await;

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::ActivationEmailMismatch))
        ));
    }

    /// Tests profile validation of present fields.
    ///
    /// Expected: empty name and short phone rejected, valid values stored
    #[tokio::test]
    async fn test_update_profile() {
        let test = TestBuilder::new().with_table(UserEntity).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = test_utils::factory::create_user(db).await.unwrap();
        let h = harness();
        let service = UserService::new(db, &h.tokens, &h.mail);

        let invalid = service
            .update_profile(
                user.id,
                UpdateProfileParams {
                    first_name: Some("".to_string()),
                    last_name: None,
                    phone_number: Some("+123".to_string()),
                },
            )
            .await;
        assert!(matches!(invalid, Err(AppError::Validation(errors)) if errors.len() == 2));

        let updated = service
            .update_profile(
                user.id,
                UpdateProfileParams {
                    phone_number: Some("+37491123456".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.phone_number.as_deref(), Some("+37491123456"));
        assert_eq!(updated.first_name, user.first_name);
    }
}
