//! Request helpers shared across controllers and services.

pub mod multipart;
pub mod normalize;
pub mod password;
pub mod validation;
