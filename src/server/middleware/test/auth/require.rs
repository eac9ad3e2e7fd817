use super::*;

mod require_super_admin;

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_missing_header() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let headers = HeaderMap::new();

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests a header using a scheme other than Bearer.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_non_bearer_scheme() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests a token signed with another secret.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_token_with_wrong_signature() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let tokens = tokens();

    // A refresh token is signed with the refresh secret and must not pass as access
    let refresh = tokens.issue_refresh(user.id, false).unwrap();
    let headers = bearer(&refresh);

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    Ok(())
}

/// Tests an expired access token.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_expired_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let tokens = tokens();

    let issued = Utc::now() - Duration::hours(2);
    let expired = tokens
        .sign(
            TokenKind::Access,
            &Claims {
                sub: user.id,
                email: Some(user.email.clone()),
                role: Some("USER".to_string()),
                iat: issued.timestamp(),
                exp: (issued + Duration::minutes(15)).timestamp(),
            },
        )
        .unwrap();
    let headers = bearer(&expired);

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    Ok(())
}

/// Tests a valid token whose user has been deleted.
///
/// Expected: Err(AuthError::UserNotFound)
#[tokio::test]
async fn rejects_token_of_deleted_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let now = Utc::now();
    let ghost = User {
        id: Uuid::new_v4(),
        email: "ghost@dealer.com".to_string(),
        password_hash: String::new(),
        role: UserRole::User,
        first_name: None,
        last_name: None,
        phone_number: None,
        is_verified: true,
        force_logout_at: None,
        created_at: now,
        updated_at: now,
    };
    let headers = bearer(&tokens.issue_access(&ghost).unwrap());

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    match result {
        Err(AppError::AuthErr(AuthError::UserNotFound(id))) => assert_eq!(id, ghost.id),
        other => panic!("Expected UserNotFound, got: {:?}", other.map(|u| u.id)),
    }

    Ok(())
}

/// Tests a token issued before the user was forcibly logged out.
///
/// Expected: Err(AuthError::SessionRevoked)
#[tokio::test]
async fn rejects_token_issued_before_force_logout() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db)
        .force_logout_at(Some(Utc::now() + Duration::minutes(5)))
        .build()
        .await?;
    let tokens = tokens();
    let headers = bearer(&access_token(&tokens, user));

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::SessionRevoked(_)))
    ));

    Ok(())
}

/// Tests a token issued after an earlier forced logout.
///
/// Expected: Ok(User)
#[tokio::test]
async fn accepts_token_issued_after_force_logout() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db)
        .force_logout_at(Some(Utc::now() - Duration::hours(1)))
        .build()
        .await?;
    let user_id = user.id;
    let tokens = tokens();
    let headers = bearer(&access_token(&tokens, user));

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await?;

    assert_eq!(result.id, user_id);

    Ok(())
}
