use super::*;

/// Tests inserting a make.
///
/// Expected: Ok(Make) retrievable by its generated id
#[tokio::test]
async fn creates_make() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MakeRepository::new(db);
    let make = repo.create("Toyota".to_string()).await?;

    let found = repo.find_by_id(make.id).await?;
    assert_eq!(found.map(|m| m.name), Some("Toyota".to_string()));

    Ok(())
}

/// Tests that make names are unique.
///
/// Expected: Err(DbErr) on the duplicate insert
#[tokio::test]
async fn rejects_duplicate_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MakeRepository::new(db);
    repo.create("Toyota".to_string()).await?;

    assert!(repo.create("Toyota".to_string()).await.is_err());

    Ok(())
}
