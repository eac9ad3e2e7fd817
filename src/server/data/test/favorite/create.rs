use super::*;

/// Tests adding a favorite.
///
/// Expected: exists returns true afterwards
#[tokio::test]
async fn adds_favorite() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _make, _model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;

    let repo = FavoriteRepository::new(db);
    assert!(!repo.exists(user.id, vehicle.id).await?);

    repo.create(user.id, vehicle.id).await?;

    assert!(repo.exists(user.id, vehicle.id).await?);

    Ok(())
}

/// Tests that a user cannot favorite the same vehicle twice.
///
/// Expected: Err(DbErr) from the composite primary key
#[tokio::test]
async fn rejects_duplicate_favorite() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _make, _model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;
    factory::create_favorite(db, user.id, vehicle.id).await?;

    let repo = FavoriteRepository::new(db);

    assert!(repo.create(user.id, vehicle.id).await.is_err());

    Ok(())
}
