use super::*;

/// Tests name lookup ignoring case.
///
/// Expected: any casing of the stored name finds the make
#[tokio::test]
async fn matches_name_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let make = factory::make::MakeFactory::new(db).name("Mercedes-Benz").build().await?;

    let repo = MakeRepository::new(db);

    assert_eq!(repo.find_by_name_ci("Mercedes-Benz").await?.map(|m| m.id), Some(make.id));
    assert_eq!(repo.find_by_name_ci("mercedes-BENZ").await?.map(|m| m.id), Some(make.id));

    Ok(())
}

/// Tests lookup of a name that is not stored.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::make::MakeFactory::new(db).name("Toyota").build().await?;

    assert!(MakeRepository::new(db).find_by_name_ci("Toyo").await?.is_none());

    Ok(())
}
