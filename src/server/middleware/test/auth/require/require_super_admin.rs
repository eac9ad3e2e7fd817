use super::*;

/// Tests a super admin passing the super admin check.
///
/// Expected: Ok(User) with role SUPER_ADMIN
#[tokio::test]
async fn grants_access_to_super_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::create_admin(db).await?;
    let admin_id = admin.id;
    let tokens = tokens();
    let headers = bearer(&access_token(&tokens, admin));

    let user = AuthGuard::new(db, &tokens, &headers)
        .require(&[Permission::SuperAdmin])
        .await?;

    assert_eq!(user.id, admin_id);
    assert!(user.is_super_admin());

    Ok(())
}

/// Tests a regular user denied the super admin check.
///
/// Expected: Err(AuthError::AccessDenied) carrying the user's id
#[tokio::test]
async fn denies_access_to_regular_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let user_id = user.id;
    let tokens = tokens();
    let headers = bearer(&access_token(&tokens, user));

    let result = AuthGuard::new(db, &tokens, &headers)
        .require(&[Permission::SuperAdmin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(id, message))) => {
            assert_eq!(id, user_id);
            assert!(message.contains("SUPER_ADMIN"));
        }
        other => panic!("Expected AccessDenied, got: {:?}", other.map(|u| u.id)),
    }

    Ok(())
}

/// Tests a regular user with no permissions required.
///
/// Expected: Ok(User)
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let tokens = tokens();
    let headers = bearer(&access_token(&tokens, user));

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(result.is_ok());

    Ok(())
}
