//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls and external services
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Handling complex multi-step operations

pub mod analytics;
pub mod auth;
pub mod customer;
pub mod document;
pub mod export;
pub mod favorite;
pub mod geo;
pub mod import;
pub mod mail;
pub mod make;
pub mod storage;
pub mod token;
pub mod user;
pub mod vehicle;
pub mod vin;
