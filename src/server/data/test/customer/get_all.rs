use super::*;

/// Tests listing and counting active customers.
///
/// Expected: deleted customers are neither listed nor counted
#[tokio::test]
async fn lists_only_active_customers() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_customer(db).await?;
    factory::create_customer(db).await?;
    factory::customer::CustomerFactory::new(db).deleted().build().await?;

    let repo = CustomerRepository::new(db);

    assert_eq!(repo.get_all().await?.len(), 2);
    assert_eq!(repo.count_active().await?, 2);

    Ok(())
}

/// Tests loading customers by id.
///
/// Expected: deleted customers are left out
#[tokio::test]
async fn find_by_ids_skips_deleted() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let active = factory::create_customer(db).await?;
    let deleted = factory::customer::CustomerFactory::new(db).deleted().build().await?;

    let repo = CustomerRepository::new(db);
    let found = repo.find_by_ids(vec![active.id, deleted.id]).await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, active.id);

    Ok(())
}
