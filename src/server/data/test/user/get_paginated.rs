use super::*;
use chrono::{Duration, Utc};

/// Tests that the caller is left out of the listing and the rest come newest first.
///
/// Expected: Ok((users, total)) without the caller, ordered by creation date descending
#[tokio::test]
async fn excludes_caller_and_orders_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let caller = factory::create_admin(db).await?;
    let older = factory::user::UserFactory::new(db)
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    let newer = factory::user::UserFactory::new(db)
        .created_at(now - Duration::days(1))
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let (users, total) = repo
        .get_paginated(&GetUsersParams {
            exclude_user_id: caller.id,
            page: 1,
            limit: 10,
            search: None,
        })
        .await?;

    assert_eq!(total, 2);
    let ids: Vec<_> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}

/// Tests paging through the user list.
///
/// Expected: second page holds the remaining user while total counts all of them
#[tokio::test]
async fn returns_requested_page() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let caller = factory::create_admin(db).await?;
    for _ in 0..3 {
        factory::create_user(db).await?;
    }

    let repo = UserRepository::new(db);
    let (users, total) = repo
        .get_paginated(&GetUsersParams {
            exclude_user_id: caller.id,
            page: 2,
            limit: 2,
            search: None,
        })
        .await?;

    assert_eq!(total, 3);
    assert_eq!(users.len(), 1);

    Ok(())
}

/// Tests filtering users by a search fragment.
///
/// Verifies the fragment matches email case-insensitively and also matches the role.
///
/// Expected: only matching users are returned
#[tokio::test]
async fn filters_by_email_or_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let caller = factory::create_user(db).await?;
    let anna = factory::user::UserFactory::new(db)
        .email("anna@dealer.com")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .email("boris@dealer.com")
        .build()
        .await?;
    let admin = factory::create_admin(db).await?;

    let repo = UserRepository::new(db);

    let (by_email, total) = repo
        .get_paginated(&GetUsersParams {
            exclude_user_id: caller.id,
            page: 1,
            limit: 10,
            search: Some("ANNA".to_string()),
        })
        .await?;
    assert_eq!(total, 1);
    assert_eq!(by_email[0].id, anna.id);

    let (by_role, _) = repo
        .get_paginated(&GetUsersParams {
            exclude_user_id: caller.id,
            page: 1,
            limit: 10,
            search: Some("admin".to_string()),
        })
        .await?;
    let ids: Vec<_> = by_role.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![admin.id]);

    Ok(())
}
