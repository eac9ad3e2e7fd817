use super::*;

/// Tests that only the provided profile fields change.
///
/// Expected: Ok(Some(User)) with the new last name and the old first name
#[tokio::test]
async fn updates_only_present_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .first_name(Some("Ani".to_string()))
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_profile(
            user.id,
            UpdateProfileParams {
                first_name: None,
                last_name: Some("Petrosyan".to_string()),
                phone_number: Some("+37477123456".to_string()),
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.first_name.as_deref(), Some("Ani"));
    assert_eq!(updated.last_name.as_deref(), Some("Petrosyan"));
    assert_eq!(updated.phone_number.as_deref(), Some("+37477123456"));

    Ok(())
}

/// Tests updating a profile that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let updated = repo
        .update_profile(
            uuid::Uuid::new_v4(),
            UpdateProfileParams {
                first_name: Some("Ghost".to_string()),
                last_name: None,
                phone_number: None,
            },
        )
        .await?;

    assert!(updated.is_none());

    Ok(())
}
