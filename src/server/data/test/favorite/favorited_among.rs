use super::*;

/// Tests resolving which of a page of vehicles the user favorited.
///
/// Expected: only the user's own favorites among the given ids
#[tokio::test]
async fn returns_favorited_subset() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _make, model, liked) = factory::create_vehicle_with_dependencies(db).await?;
    let plain = factory::create_vehicle(db, model.id, user.id).await?;
    let other_user = factory::create_user(db).await?;
    factory::create_favorite(db, user.id, liked.id).await?;
    factory::create_favorite(db, other_user.id, plain.id).await?;

    let repo = FavoriteRepository::new(db);
    let favorited = repo
        .favorited_among(user.id, vec![liked.id, plain.id])
        .await?;

    assert!(favorited.contains(&liked.id));
    assert!(!favorited.contains(&plain.id));
    assert_eq!(favorited.len(), 1);

    Ok(())
}
