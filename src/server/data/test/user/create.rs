use super::*;

/// Tests inserting an invited account.
///
/// Verifies that the stored row carries the given email, role and verification
/// state and that no forced logout is recorded yet.
///
/// Expected: Ok(User) with matching fields
#[tokio::test]
async fn creates_unverified_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(NewUserParams {
            email: "new.hire@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::User,
            first_name: Some("New".to_string()),
            last_name: Some("Hire".to_string()),
            phone_number: Some("077123456".to_string()),
            is_verified: false,
        })
        .await?;

    assert_eq!(user.email, "new.hire@example.com");
    assert_eq!(user.role, UserRole::User);
    assert!(!user.is_verified);
    assert!(user.force_logout_at.is_none());

    let stored = repo.find_by_id(user.id).await?;
    assert_eq!(stored.map(|u| u.email), Some("new.hire@example.com".to_string()));

    Ok(())
}

/// Tests that two accounts cannot share an email.
///
/// Expected: Err(DbErr) on the second insert
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("taken@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let result = repo
        .create(NewUserParams {
            email: "taken@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::User,
            first_name: None,
            last_name: None,
            phone_number: None,
            is_verified: false,
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
