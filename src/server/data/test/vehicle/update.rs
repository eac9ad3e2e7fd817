use super::*;

/// Tests overwriting a vehicle's editable fields.
///
/// Expected: Ok(Some(Vehicle)) with the new VIN, city and status
#[tokio::test]
async fn updates_vehicle_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, _make, model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;

    let mut changes = params(model.id, "2HGFB2F50DH512345");
    changes.city = "Gyumri".to_string();
    changes.status = VehicleStatus::Sold;

    let repo = VehicleRepository::new(db);
    let updated = repo.update(vehicle.id, changes).await?.unwrap();

    assert_eq!(updated.id, vehicle.id);
    assert_eq!(updated.vin, "2HGFB2F50DH512345");
    assert_eq!(updated.city, "Gyumri");
    assert_eq!(updated.status, VehicleStatus::Sold);

    Ok(())
}

/// Tests that deleted vehicles cannot be updated.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_deleted_vehicle() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (_make, model) = factory::create_make_with_model(db).await?;
    let vehicle = factory::vehicle::VehicleFactory::new(db, model.id, user.id)
        .deleted()
        .build()
        .await?;

    let repo = VehicleRepository::new(db);
    let updated = repo
        .update(vehicle.id, params(model.id, "2HGFB2F50DH512345"))
        .await?;

    assert!(updated.is_none());

    Ok(())
}
