use super::*;

/// Tests registering a vehicle.
///
/// Expected: Ok(Vehicle) owned by the user, unassigned and not imported
#[tokio::test]
async fn creates_vehicle() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (_make, model) = factory::create_make_with_model(db).await?;

    let repo = VehicleRepository::new(db);
    let vehicle = repo
        .create(user.id, params(model.id, "JH4KA7561PC008269"), false)
        .await?;

    assert_eq!(vehicle.user_id, user.id);
    assert_eq!(vehicle.model_id, model.id);
    assert_eq!(vehicle.status, VehicleStatus::InStock);
    assert!(vehicle.customer_id.is_none());
    assert!(vehicle.assigned_date.is_none());
    assert!(!vehicle.imported);

    Ok(())
}

/// Tests that the VIN column is unique.
///
/// Expected: Err(DbErr) for a second vehicle with the same VIN
#[tokio::test]
async fn rejects_duplicate_vin() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (_make, model) = factory::create_make_with_model(db).await?;

    let repo = VehicleRepository::new(db);
    repo.create(user.id, params(model.id, "JH4KA7561PC008269"), false)
        .await?;

    let duplicate = repo
        .create(user.id, params(model.id, "JH4KA7561PC008269"), true)
        .await;

    assert!(duplicate.is_err());

    Ok(())
}
