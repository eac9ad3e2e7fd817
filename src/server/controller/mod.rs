//! HTTP handlers.
//!
//! Each handler authenticates through `AuthGuard`, converts the request DTO to
//! service parameters, calls one service and converts the result back to a DTO.

pub mod analytics;
pub mod auth;
pub mod customer;
pub mod document;
pub mod favorite;
pub mod import;
pub mod make;
pub mod upload;
pub mod user;
pub mod vehicle;
pub mod vin;

#[cfg(test)]
mod test;
