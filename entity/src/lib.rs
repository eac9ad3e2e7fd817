//! SeaORM entity definitions for the DealerDesk schema.
//!
//! One module per table. Column enums and relations are consumed by the repository
//! layer in the main crate and by the `test-utils` factories.

pub mod prelude;

pub mod customer;
pub mod document;
pub mod favorite;
pub mod make;
pub mod sea_orm_active_enums;
pub mod user;
pub mod vehicle;
pub mod vehicle_image;
pub mod vehicle_model;
