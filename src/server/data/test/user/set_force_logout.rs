use super::*;
use chrono::{DurationRound, TimeDelta, Utc};

/// Tests recording a forced logout timestamp.
///
/// Expected: force_logout_at equals the given instant
#[tokio::test]
async fn stores_force_logout_timestamp() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let at = Utc::now().duration_trunc(TimeDelta::seconds(1)).unwrap();

    let repo = UserRepository::new(db);
    repo.set_force_logout(user.id, at).await?;

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(stored.force_logout_at, Some(at));

    Ok(())
}

/// Tests that activation verifies the account and stores the new name and hash.
///
/// Expected: is_verified is true with the new first name and password hash
#[tokio::test]
async fn activate_marks_user_verified() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .verified(false)
        .build()
        .await?;

    let repo = UserRepository::new(db);
    repo.activate(user.id, "Narek".to_string(), "new-hash".to_string())
        .await?;

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert!(stored.is_verified);
    assert_eq!(stored.first_name.as_deref(), Some("Narek"));
    assert_eq!(stored.password_hash, "new-hash");

    Ok(())
}
