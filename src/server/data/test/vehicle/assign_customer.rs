use super::*;

/// Tests recording a sale.
///
/// Expected: customer set, status sold and an assignment date recorded
#[tokio::test]
async fn marks_vehicle_sold_to_customer() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, _make, _model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;
    let customer = factory::create_customer(db).await?;

    let repo = VehicleRepository::new(db);
    let assigned = repo.assign_customer(vehicle.id, customer.id).await?.unwrap();

    assert_eq!(assigned.customer_id, Some(customer.id));
    assert_eq!(assigned.status, VehicleStatus::Sold);
    assert!(assigned.assigned_date.is_some());

    Ok(())
}

/// Tests assigning a vehicle that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_vehicle() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_customer(db).await?;

    let repo = VehicleRepository::new(db);
    let assigned = repo.assign_customer(uuid::Uuid::new_v4(), customer.id).await?;

    assert!(assigned.is_none());

    Ok(())
}
