use super::*;

/// Tests creating a customer for a new email.
///
/// Expected: Ok((Customer, true))
#[tokio::test]
async fn inserts_new_customer() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CustomerRepository::new(db);
    let (customer, created) = repo.upsert_by_email(params("buyer@example.com")).await?;

    assert!(created);
    assert_eq!(customer.email, "buyer@example.com");
    assert_eq!(customer.first_name, "Aram");

    Ok(())
}

/// Tests that an existing email updates the customer in place.
///
/// Expected: Ok((Customer, false)) with the same id and new details
#[tokio::test]
async fn updates_existing_customer() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::customer::CustomerFactory::new(db)
        .email("buyer@example.com")
        .first_name("Old")
        .build()
        .await?;

    let repo = CustomerRepository::new(db);
    let (customer, created) = repo.upsert_by_email(params("Buyer@Example.com")).await?;

    assert!(!created);
    assert_eq!(customer.id, existing.id);
    assert_eq!(customer.first_name, "Aram");
    assert_eq!(repo.get_all().await?.len(), 1);

    Ok(())
}

/// Tests that a soft-deleted customer is restored rather than duplicated.
///
/// Expected: the same id becomes visible again
#[tokio::test]
async fn restores_deleted_customer() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deleted = factory::customer::CustomerFactory::new(db)
        .email("returning@example.com")
        .deleted()
        .build()
        .await?;

    let repo = CustomerRepository::new(db);
    assert!(repo.find_by_id(deleted.id).await?.is_none());

    let (customer, created) = repo.upsert_by_email(params("returning@example.com")).await?;

    assert!(!created);
    assert_eq!(customer.id, deleted.id);
    assert!(repo.find_by_id(deleted.id).await?.is_some());

    Ok(())
}
