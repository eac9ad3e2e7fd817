use super::*;

/// Tests storing image URLs and loading them per vehicle.
///
/// Expected: images are returned only for the requested vehicles
#[tokio::test]
async fn stores_and_loads_images() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _make, model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;
    let other = factory::create_vehicle(db, model.id, user.id).await?;
    factory::create_vehicle_image(db, other.id).await?;

    let repo = VehicleImageRepository::new(db);
    let image = repo
        .create(vehicle.id, "https://cdn.example.com/vehicles/front.jpg".to_string())
        .await?;

    let images = repo.get_by_vehicle_ids(vec![vehicle.id]).await?;

    assert_eq!(images.len(), 1);
    assert_eq!(images[0].id, image.id);
    assert_eq!(images[0].image_url, "https://cdn.example.com/vehicles/front.jpg");
    assert!(repo.get_by_vehicle_ids(Vec::new()).await?.is_empty());

    Ok(())
}

/// Tests that images of another vehicle are not returned for removal.
///
/// Expected: only ids belonging to the vehicle are returned
#[tokio::test]
async fn get_for_vehicle_ignores_foreign_images() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _make, model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;
    let other = factory::create_vehicle(db, model.id, user.id).await?;
    let own = factory::create_vehicle_image(db, vehicle.id).await?;
    let foreign = factory::create_vehicle_image(db, other.id).await?;

    let repo = VehicleImageRepository::new(db);
    let found = repo
        .get_for_vehicle(vehicle.id, vec![own.id, foreign.id])
        .await?;

    assert_eq!(found.iter().map(|i| i.id).collect::<Vec<_>>(), vec![own.id]);

    Ok(())
}
