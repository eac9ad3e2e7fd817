//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.
//! Input parameters are validated while converting from their DTOs, so services only
//! ever see well-formed values.

pub mod analytics;
pub mod auth;
pub mod customer;
pub mod document;
pub mod export;
pub mod import;
pub mod make;
pub mod upload;
pub mod user;
pub mod vehicle;
pub mod vin;
