//! Customer domain models and parameters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::customer::{CustomerDto, CustomerInputDto},
    server::{
        error::AppError,
        util::validation::{is_valid_customer_phone, is_valid_email, Validator},
    },
};

/// Buyer of a vehicle, identified by email.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn from_entity(entity: entity::customer::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            phone_number: entity.phone_number,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> CustomerDto {
        CustomerDto {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated customer fields for create-or-update by email.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerParams {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl CustomerParams {
    /// Validates and trims the submitted customer fields.
    ///
    /// # Returns
    /// - `Ok(CustomerParams)` - All fields present and well formed
    /// - `Err(AppError::Validation)` - One entry per rejected field
    pub fn from_dto(dto: CustomerInputDto) -> Result<Self, AppError> {
        let params = Self {
            email: dto.email.trim().to_string(),
            first_name: dto.first_name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            phone_number: dto.phone.trim().to_string(),
        };

        let mut validator = Validator::new();
        validator
            .required("email", &params.email, "Email is required")
            .check(
                "email",
                is_valid_email(&params.email),
                "Enter a valid email address",
            )
            .required("firstName", &params.first_name, "First Name is required")
            .required("lastName", &params.last_name, "Last Name is required")
            .required("phone", &params.phone_number, "Phone Number is required")
            .check(
                "phone",
                is_valid_customer_phone(&params.phone_number),
                "Enter a valid Armenian phone number",
            );
        validator.finish()?;

        Ok(params)
    }
}
