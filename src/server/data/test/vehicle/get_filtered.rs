use super::*;

/// Tests restricting the unpaged query to a user's favorites.
///
/// Expected: only vehicles favorited by that user
#[tokio::test]
async fn restricts_to_user_favorites() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _make, model, favorite) = factory::create_vehicle_with_dependencies(db).await?;
    let other = factory::create_vehicle(db, model.id, user.id).await?;
    let someone_else = factory::create_user(db).await?;
    factory::create_favorite(db, user.id, favorite.id).await?;
    factory::create_favorite(db, someone_else.id, other.id).await?;

    let repo = VehicleRepository::new(db);

    let all = repo.get_filtered(&VehicleFilter::default(), None).await?;
    assert_eq!(all.len(), 2);

    let favorites = repo
        .get_filtered(&VehicleFilter::default(), Some(user.id))
        .await?;
    assert_eq!(favorites.iter().map(|v| v.id).collect::<Vec<_>>(), vec![favorite.id]);

    Ok(())
}

/// Tests listing favorites skips deleted vehicles.
///
/// Expected: a deleted favorite is not returned
#[tokio::test]
async fn favorites_skip_deleted_vehicles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _make, model, kept) = factory::create_vehicle_with_dependencies(db).await?;
    let removed = factory::vehicle::VehicleFactory::new(db, model.id, user.id)
        .deleted()
        .build()
        .await?;
    factory::create_favorite(db, user.id, kept.id).await?;
    factory::create_favorite(db, user.id, removed.id).await?;

    let repo = VehicleRepository::new(db);
    let favorites = repo.get_favorites_of(user.id).await?;

    assert_eq!(favorites.iter().map(|v| v.id).collect::<Vec<_>>(), vec![kept.id]);

    Ok(())
}
