use super::*;

/// Tests deleting selected images.
///
/// Expected: only the listed image is removed
#[tokio::test]
async fn deletes_listed_images() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, _make, _model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;
    let first = factory::create_vehicle_image(db, vehicle.id).await?;
    let second = factory::create_vehicle_image(db, vehicle.id).await?;

    let repo = VehicleImageRepository::new(db);
    assert_eq!(repo.delete_by_ids(vec![first.id]).await?, 1);
    assert_eq!(repo.delete_by_ids(Vec::new()).await?, 0);

    let remaining = repo.get_by_vehicle_ids(vec![vehicle.id]).await?;
    assert_eq!(remaining.iter().map(|i| i.id).collect::<Vec<_>>(), vec![second.id]);

    Ok(())
}

/// Tests deleting every image of a vehicle.
///
/// Expected: all of the vehicle's images are removed
#[tokio::test]
async fn deletes_all_images_of_vehicle() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, _make, _model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;
    factory::create_vehicle_image(db, vehicle.id).await?;
    factory::create_vehicle_image(db, vehicle.id).await?;

    let repo = VehicleImageRepository::new(db);

    assert_eq!(repo.delete_by_vehicle(vehicle.id).await?, 2);
    assert!(repo.get_by_vehicle_ids(vec![vehicle.id]).await?.is_empty());

    Ok(())
}
