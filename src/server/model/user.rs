//! User domain models and parameters.
//!
//! Provides the back-office account model with its role and verification state,
//! plus parameter types for invitations, activation, profile updates and listing.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::UserRole;
use uuid::Uuid;

use crate::model::user::{
    ActivateUserDto, CreateUserDto, InvitedUserDto, PaginatedUsersDto, UpdateProfileDto, UserDto,
};

/// Back-office account.
///
/// Invited accounts start unverified with an unusable password and become
/// usable once activated through the emailed link.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// bcrypt hash of the account password.
    pub password_hash: String,
    pub role: UserRole,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    /// Whether the invitation has been accepted.
    pub is_verified: bool,
    /// Access tokens issued before this instant are rejected.
    pub force_logout_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            role: entity.role,
            first_name: entity.first_name,
            last_name: entity.last_name,
            phone_number: entity.phone_number,
            is_verified: entity.is_verified,
            force_logout_at: entity.force_logout_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts the user domain model to a DTO for API responses.
    ///
    /// The password hash never leaves the server.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            role: role_name(self.role).to_string(),
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            is_verified: self.is_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == UserRole::SuperAdmin
    }

    /// Name used to greet the user in emails, `"User"` when no first name is set.
    pub fn greeting_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("User")
    }
}

/// Wire representation of a role, matching the stored value.
pub fn role_name(role: UserRole) -> &'static str {
    match role {
        UserRole::SuperAdmin => "SUPER_ADMIN",
        UserRole::User => "USER",
    }
}

/// Parameters for inviting a new user.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl CreateUserParams {
    pub fn from_dto(dto: CreateUserDto) -> Self {
        Self {
            email: dto.email.trim().to_string(),
            first_name: dto.first_name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            phone_number: dto.phone_number.trim().to_string(),
        }
    }
}

/// Row to insert for a new account.
#[derive(Debug, Clone)]
pub struct NewUserParams {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub is_verified: bool,
}

/// Parameters for the caller editing their own profile. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: UpdateProfileDto) -> Self {
        Self {
            first_name: dto.first_name.map(|v| v.trim().to_string()),
            last_name: dto.last_name.map(|v| v.trim().to_string()),
            phone_number: dto.phone_number.map(|v| v.trim().to_string()),
        }
    }
}

/// Parameters for accepting an invitation.
#[derive(Debug, Clone)]
pub struct ActivateUserParams {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub token: String,
}

impl ActivateUserParams {
    pub fn from_dto(dto: ActivateUserDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            email: dto.email.trim().to_string(),
            password: dto.password,
            confirm_password: dto.confirm_password,
            token: dto.token.trim().to_string(),
        }
    }
}

/// Pending invitation shown on the activation page.
#[derive(Debug, Clone, PartialEq)]
pub struct InvitedUser {
    pub name: String,
    pub email: String,
}

impl InvitedUser {
    pub fn into_dto(self) -> InvitedUserDto {
        InvitedUserDto {
            name: self.name,
            email: self.email,
        }
    }
}

/// Parameters for listing users.
#[derive(Debug, Clone)]
pub struct GetUsersParams {
    /// The caller, who never appears in their own listing.
    pub exclude_user_id: Uuid,
    /// 1-based page number.
    pub page: u64,
    pub limit: u64,
    /// Case-insensitive fragment matched against email or role.
    pub search: Option<String>,
}

/// One page of users with the total matching count.
#[derive(Debug, Clone)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            total: self.total,
            users: self.users.into_iter().map(User::into_dto).collect(),
        }
    }
}
