use super::*;

/// Tests removing a favorite.
///
/// Expected: Ok(true) the first time and Ok(false) once it is gone
#[tokio::test]
async fn removes_favorite() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _make, _model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;
    factory::create_favorite(db, user.id, vehicle.id).await?;

    let repo = FavoriteRepository::new(db);

    assert!(repo.delete(user.id, vehicle.id).await?);
    assert!(!repo.delete(user.id, vehicle.id).await?);
    assert!(!repo.exists(user.id, vehicle.id).await?);

    Ok(())
}
