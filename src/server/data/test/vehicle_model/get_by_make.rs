use super::*;

/// Tests listing the models of one make.
///
/// Expected: only models of the requested make
#[tokio::test]
async fn lists_models_of_make() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (make, model) = factory::create_make_with_model(db).await?;
    let second = factory::create_vehicle_model(db, make.id).await?;
    factory::create_make_with_model(db).await?;

    let repo = VehicleModelRepository::new(db);
    let mut ids: Vec<_> = repo.get_by_make(make.id).await?.into_iter().map(|m| m.id).collect();
    ids.sort();

    let mut expected = vec![model.id, second.id];
    expected.sort();
    assert_eq!(ids, expected);

    Ok(())
}

/// Tests listing models of a make without any.
///
/// Expected: Ok(empty)
#[tokio::test]
async fn returns_empty_for_make_without_models() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let make = factory::create_make(db).await?;

    let repo = VehicleModelRepository::new(db);
    assert!(repo.get_by_make(make.id).await?.is_empty());

    Ok(())
}
