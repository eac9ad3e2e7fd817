use super::*;

/// Tests inserting a model under a make.
///
/// Expected: Ok(VehicleModel) linked to the make
#[tokio::test]
async fn creates_model_for_make() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let make = factory::create_make(db).await?;

    let repo = VehicleModelRepository::new(db);
    let model = repo.create(make.id, "Corolla".to_string()).await?;

    assert_eq!(model.make_id, make.id);
    assert_eq!(repo.find_by_id(model.id).await?.map(|m| m.name), Some("Corolla".to_string()));

    Ok(())
}

/// Tests that a model cannot reference a missing make.
///
/// Expected: Err(DbErr) from the foreign key
#[tokio::test]
async fn rejects_unknown_make() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VehicleModelRepository::new(db);

    assert!(repo.create(9999, "Orphan".to_string()).await.is_err());

    Ok(())
}
