use super::*;

/// Tests suggesting customers from an email fragment.
///
/// Verifies matching is case-insensitive and soft-deleted customers are skipped.
///
/// Expected: only active customers containing the fragment
#[tokio::test]
async fn matches_fragment_and_skips_deleted() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let john = factory::customer::CustomerFactory::new(db)
        .email("john.doe@mail.am")
        .build()
        .await?;
    factory::customer::CustomerFactory::new(db)
        .email("johnny@mail.am")
        .deleted()
        .build()
        .await?;
    factory::customer::CustomerFactory::new(db)
        .email("mary@mail.am")
        .build()
        .await?;

    let repo = CustomerRepository::new(db);
    let found = repo.search_by_email("JOHN").await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, john.id);

    Ok(())
}
