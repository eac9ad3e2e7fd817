//! Database repository layer for all domain entities.
//!
//! Each repository wraps SeaORM entity queries for one table and returns the domain
//! models from `server::model`, keeping entity types out of the service layer.
//! Repositories that take part in transactions are generic over `ConnectionTrait`.

pub mod customer;
pub mod document;
pub mod favorite;
pub mod filter;
pub mod make;
pub mod user;
pub mod vehicle;
pub mod vehicle_image;
pub mod vehicle_model;

#[cfg(test)]
mod test;
