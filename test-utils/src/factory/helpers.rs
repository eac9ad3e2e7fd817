//! Shared helper utilities for factory methods.
//!
//! Provides id generation for unique test values and shortcuts for creating
//! entities together with the rows they reference.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a make with a single model attached to it.
///
/// # Returns
/// - `Ok((make, model))` - The created make and model
/// - `Err(DbErr)` - Database error during creation
pub async fn create_make_with_model(
    db: &DatabaseConnection,
) -> Result<(entity::make::Model, entity::vehicle_model::Model), DbErr> {
    let make = crate::factory::make::create_make(db).await?;
    let model = crate::factory::vehicle_model::create_vehicle_model(db, make.id).await?;

    Ok((make, model))
}

/// Creates a complete vehicle hierarchy with default values.
///
/// Creates, in order:
/// 1. User (the vehicle's creator)
/// 2. Make
/// 3. Model
/// 4. Vehicle
///
/// # Returns
/// - `Ok((user, make, model, vehicle))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_vehicle_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::make::Model,
        entity::vehicle_model::Model,
        entity::vehicle::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let (make, model) = create_make_with_model(db).await?;
    let vehicle = crate::factory::vehicle::create_vehicle(db, model.id, user.id).await?;

    Ok((user, make, model, vehicle))
}
