//! Request field validation.
//!
//! `Validator` collects one failure per field and converts into
//! `AppError::Validation`, which renders as 400 with a `details` list. The
//! `is_valid_*` functions hold the format rules shared by several endpoints.

use regex::Regex;
use std::sync::LazyLock;

use crate::server::error::AppError;

static VIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").expect("static VIN pattern"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("static email pattern")
});

static ZIPCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]{1,8}[A-Za-z0-9]$").expect("static zipcode pattern")
});

static INVITE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("static phone pattern"));

static PROFILE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{7,14}$").expect("static phone pattern"));

static ARMENIAN_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+374|374|0)?(77|91|93|94|95|96|97|98|99|33)\d{6}$")
        .expect("static phone pattern")
});

const PASSWORD_SPECIAL_CHARS: &str = "@$!%*?&";

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulates field errors for one request.
///
/// Only the first failure recorded for a field is kept, so checks for a field
/// should be chained from most to least fundamental (presence, then format).
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field` unless `ok` holds.
    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok && !self.errors.iter().any(|e| e.field == field) {
            self.errors.push(FieldError {
                field: field.to_string(),
                message: message.to_string(),
            });
        }
        self
    }

    /// Rejects empty or whitespace-only values.
    pub fn required(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        self.check(field, !value.trim().is_empty(), message)
    }

    /// Applies the password policy to `value`.
    pub fn password(&mut self, field: &str, value: &str) -> &mut Self {
        self.required(field, value, "Password is required.");
        if let Some(message) = password_violation(value) {
            self.check(field, false, message);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `AppError::Validation` when any check failed.
    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

pub fn is_valid_vin(vin: &str) -> bool {
    VIN.is_match(vin)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// 3 to 10 letters, digits, spaces or dashes, not starting or ending with a separator.
pub fn is_valid_zipcode(zipcode: &str) -> bool {
    ZIPCODE.is_match(zipcode)
}

/// E.164-like number used when inviting a user.
pub fn is_valid_invite_phone(phone: &str) -> bool {
    INVITE_PHONE.is_match(phone)
}

/// Stricter variant used on profile updates (at least 8 digits).
pub fn is_valid_profile_phone(phone: &str) -> bool {
    PROFILE_PHONE.is_match(phone)
}

/// Armenian mobile number, with or without the country prefix.
pub fn is_valid_customer_phone(phone: &str) -> bool {
    ARMENIAN_PHONE.is_match(phone)
}

/// Returns the first password policy rule `password` breaks.
pub fn password_violation(password: &str) -> Option<&'static str> {
    if password.chars().count() < 8 {
        Some("Password must be at least 8 characters long.")
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Password must include an uppercase letter.")
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        Some("Password must include a lowercase letter.")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must include a number.")
    } else if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        Some("Password must include a special character (e.g., @$!%*?&).")
    } else {
        None
    }
}
