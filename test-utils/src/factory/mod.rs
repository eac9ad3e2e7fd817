//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation. Factories do not
//! create parent rows on their own; pass the ids of previously created parents, or use
//! the `helpers` module to build a complete vehicle hierarchy.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::create_user(&db).await?;
//!     let (make, model) = factory::create_make_with_model(&db).await?;
//!     let vehicle = factory::create_vehicle(&db, model.id, user.id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let vehicle = factory::vehicle::VehicleFactory::new(&db, model.id, user.id)
//!     .vin("1HGCM82633A004352")
//!     .year("2019")
//!     .status(VehicleStatus::Sold)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users (admin or regular, verified or invited)
//! - `make` - Makes
//! - `vehicle_model` - Models belonging to a make
//! - `customer` - Customers
//! - `vehicle` - Vehicles
//! - `vehicle_image` - Vehicle images
//! - `favorite` - Favorites
//! - `document` - Documents
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod customer;
pub mod document;
pub mod favorite;
pub mod helpers;
pub mod make;
pub mod user;
pub mod vehicle;
pub mod vehicle_image;
pub mod vehicle_model;

pub use customer::create_customer;
pub use document::create_document;
pub use favorite::create_favorite;
pub use helpers::{create_make_with_model, create_vehicle_with_dependencies};
pub use make::create_make;
pub use user::{create_admin, create_user};
pub use vehicle::create_vehicle;
pub use vehicle_image::create_vehicle_image;
pub use vehicle_model::create_vehicle_model;
