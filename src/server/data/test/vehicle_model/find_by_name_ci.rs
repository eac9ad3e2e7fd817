use super::*;

/// Tests that name lookups are scoped to the make.
///
/// Expected: the model is found under its own make only
#[tokio::test]
async fn scopes_lookup_to_make() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (make, model) = factory::create_make_with_model(db).await?;
    let other_make = factory::create_make(db).await?;

    let repo = VehicleModelRepository::new(db);

    assert_eq!(
        repo.find_by_name_ci(make.id, &model.name).await?.map(|m| m.id),
        Some(model.id)
    );
    assert!(repo.find_by_name_ci(other_make.id, &model.name).await?.is_none());

    Ok(())
}

/// Tests case-insensitive model lookup.
///
/// Expected: Ok(Some) for a differently cased name
#[tokio::test]
async fn matches_name_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let make = factory::create_make(db).await?;
    let model = factory::vehicle_model::VehicleModelFactory::new(db, make.id)
        .name("Land Cruiser")
        .build()
        .await?;

    let repo = VehicleModelRepository::new(db);

    assert_eq!(
        repo.find_by_name_ci(make.id, "LAND cruiser").await?.map(|m| m.id),
        Some(model.id)
    );

    Ok(())
}
