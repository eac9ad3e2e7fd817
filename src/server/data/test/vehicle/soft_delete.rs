use super::*;

/// Tests that a soft-deleted vehicle disappears from reads and counts.
///
/// Expected: find_by_id returns None and the active count drops
#[tokio::test]
async fn hides_deleted_vehicle() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, _make, _model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;

    let repo = VehicleRepository::new(db);
    assert_eq!(repo.count_active(None).await?, 1);

    repo.soft_delete(vehicle.id).await?;

    assert!(repo.find_by_id(vehicle.id).await?.is_none());
    assert_eq!(repo.count_active(None).await?, 0);
    assert!(repo.vin_exists(&vehicle.vin, None).await?);

    Ok(())
}

/// Tests counting vehicles by status.
///
/// Expected: only sold vehicles are counted when filtering on sold
#[tokio::test]
async fn counts_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _make, model, _vehicle) = factory::create_vehicle_with_dependencies(db).await?;
    factory::vehicle::VehicleFactory::new(db, model.id, user.id)
        .status(VehicleStatus::Sold)
        .build()
        .await?;
    factory::vehicle::VehicleFactory::new(db, model.id, user.id)
        .status(VehicleStatus::Sold)
        .deleted()
        .build()
        .await?;

    let repo = VehicleRepository::new(db);

    assert_eq!(repo.count_active(None).await?, 2);
    assert_eq!(repo.count_active(Some(VehicleStatus::Sold)).await?, 1);

    Ok(())
}
