use super::*;

/// Tests that VIN checks see soft-deleted vehicles.
///
/// Expected: Ok(true) for a VIN held only by a deleted vehicle
#[tokio::test]
async fn includes_deleted_vehicles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (_make, model) = factory::create_make_with_model(db).await?;
    factory::vehicle::VehicleFactory::new(db, model.id, user.id)
        .vin("JH4KA7561PC008269")
        .deleted()
        .build()
        .await?;

    let repo = VehicleRepository::new(db);

    assert!(repo.vin_exists("JH4KA7561PC008269", None).await?);
    assert!(!repo.vin_exists("1FTFW1ET1DFC10312", None).await?);

    Ok(())
}

/// Tests excluding the vehicle being edited from the VIN check.
///
/// Expected: Ok(false) when the only holder is the excluded vehicle
#[tokio::test]
async fn ignores_excluded_vehicle() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, _make, _model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;

    let repo = VehicleRepository::new(db);

    assert!(repo.vin_exists(&vehicle.vin, None).await?);
    assert!(!repo.vin_exists(&vehicle.vin, Some(vehicle.id)).await?);

    Ok(())
}
