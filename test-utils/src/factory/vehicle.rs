//! Vehicle factory for creating test vehicle entities.
//!
//! Vehicles reference a model and a creating user, both of which must already exist.
//! See `helpers::create_vehicle_with_dependencies` to create them all at once.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::VehicleStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test vehicles with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::vehicle::VehicleFactory;
///
/// let vehicle = VehicleFactory::new(&db, model.id, user.id)
///     .vin("1HGCM82633A004352")
///     .status(VehicleStatus::Sold)
///     .build()
///     .await?;
/// ```
pub struct VehicleFactory<'a> {
    db: &'a DatabaseConnection,
    model_id: i32,
    user_id: Uuid,
    customer_id: Option<Uuid>,
    year: String,
    vin: String,
    street: String,
    city: String,
    state: String,
    country: String,
    zipcode: String,
    status: VehicleStatus,
    location: String,
    imported: bool,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl<'a> VehicleFactory<'a> {
    /// Creates a new VehicleFactory with default values.
    ///
    /// Defaults:
    /// - vin: `"1HGCM8263"` followed by the zero-padded counter, always 17 valid characters
    /// - year: `"2020"`
    /// - address: `"1 Main St"`, `"Yerevan"`, `"Yerevan"`, `"Armenia"`, `"0010"`
    /// - status: `VehicleStatus::InStock`
    /// - location: `"40.1792,44.4991"`
    pub fn new(db: &'a DatabaseConnection, model_id: i32, user_id: Uuid) -> Self {
        Self {
            db,
            model_id,
            user_id,
            customer_id: None,
            year: "2020".to_string(),
            vin: format!("1HGCM8263{:08}", next_id()),
            street: "1 Main St".to_string(),
            city: "Yerevan".to_string(),
            state: "Yerevan".to_string(),
            country: "Armenia".to_string(),
            zipcode: "0010".to_string(),
            status: VehicleStatus::InStock,
            location: "40.1792,44.4991".to_string(),
            imported: false,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    pub fn vin(mut self, vin: impl Into<String>) -> Self {
        self.vin = vin.into();
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn customer_id(mut self, customer_id: Option<Uuid>) -> Self {
        self.customer_id = customer_id;
        self
    }

    /// Sets street, city, state and country in one call.
    pub fn address(
        mut self,
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.street = street.into();
        self.city = city.into();
        self.state = state.into();
        self.country = country.into();
        self
    }

    pub fn status(mut self, status: VehicleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn imported(mut self, imported: bool) -> Self {
        self.imported = imported;
        self
    }

    /// Sets the creation timestamp, used to control ordering in list tests.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Marks the vehicle as soft-deleted.
    pub fn deleted(mut self) -> Self {
        self.deleted_at = Some(Utc::now());
        self
    }

    /// Builds and inserts the vehicle entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::vehicle::Model)` - Created vehicle entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::vehicle::Model, DbErr> {
        entity::vehicle::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            model_id: ActiveValue::Set(self.model_id),
            user_id: ActiveValue::Set(self.user_id),
            customer_id: ActiveValue::Set(self.customer_id),
            year: ActiveValue::Set(self.year),
            vin: ActiveValue::Set(self.vin),
            street: ActiveValue::Set(self.street),
            city: ActiveValue::Set(self.city),
            state: ActiveValue::Set(self.state),
            country: ActiveValue::Set(self.country),
            zipcode: ActiveValue::Set(self.zipcode),
            status: ActiveValue::Set(self.status),
            location: ActiveValue::Set(self.location),
            assigned_date: ActiveValue::Set(None),
            imported: ActiveValue::Set(self.imported),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            deleted_at: ActiveValue::Set(self.deleted_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an in-stock vehicle with default values.
pub async fn create_vehicle(
    db: &DatabaseConnection,
    model_id: i32,
    user_id: Uuid,
) -> Result<entity::vehicle::Model, DbErr> {
    VehicleFactory::new(db, model_id, user_id).build().await
}
