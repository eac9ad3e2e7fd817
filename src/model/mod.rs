//! Data transfer objects exchanged over the HTTP API.
//!
//! Every request and response body is defined here so that the wire format lives in
//! one place. Server-side domain models convert to and from these types at the
//! controller boundary with `from_dto` / `into_dto`.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod customer;
pub mod document;
pub mod import;
pub mod make;
pub mod user;
pub mod vehicle;
pub mod vin;
