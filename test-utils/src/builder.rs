use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Add entity tables with `with_table()` (or one of the grouped helpers), then call
/// `build()` to create an in-memory SQLite database containing them.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Make, VehicleModel};
///
/// let test = TestBuilder::new()
///     .with_table(Make)
///     .with_table(VehicleModel)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables with foreign keys must be added after the tables they reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the make and model catalog tables.
    pub fn with_catalog_tables(self) -> Self {
        self.with_table(Make).with_table(VehicleModel)
    }

    /// Adds every table a vehicle row depends on, plus the vehicle and image tables.
    ///
    /// Tables in dependency order:
    /// - Make, VehicleModel
    /// - User
    /// - Customer
    /// - Vehicle, VehicleImage
    pub fn with_vehicle_tables(self) -> Self {
        self.with_catalog_tables()
            .with_table(User)
            .with_table(Customer)
            .with_table(Vehicle)
            .with_table(VehicleImage)
    }

    /// Adds the complete schema: vehicle tables plus favorites and documents.
    pub fn with_all_tables(self) -> Self {
        self.with_vehicle_tables()
            .with_table(Favorite)
            .with_table(Document)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with tables ready
    /// - `Err(TestError::Database)` - Failed to connect or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
