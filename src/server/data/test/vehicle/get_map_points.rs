use super::*;

/// Tests that map points carry id and location for matching vehicles.
///
/// Expected: one point per non-deleted vehicle
#[tokio::test]
async fn returns_location_of_active_vehicles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (_make, model) = factory::create_make_with_model(db).await?;
    let vehicle = factory::vehicle::VehicleFactory::new(db, model.id, user.id)
        .location("40.7942,43.8453")
        .build()
        .await?;
    factory::vehicle::VehicleFactory::new(db, model.id, user.id)
        .deleted()
        .build()
        .await?;

    let repo = VehicleRepository::new(db);
    let points = repo.get_map_points(&VehicleFilter::default()).await?;

    assert_eq!(points.len(), 1);
    assert_eq!(points[0].id, vehicle.id);
    assert_eq!(points[0].location, "40.7942,43.8453");

    Ok(())
}
