pub use super::customer::Entity as Customer;
pub use super::document::Entity as Document;
pub use super::favorite::Entity as Favorite;
pub use super::make::Entity as Make;
pub use super::user::Entity as User;
pub use super::vehicle::Entity as Vehicle;
pub use super::vehicle_image::Entity as VehicleImage;
pub use super::vehicle_model::Entity as VehicleModel;
