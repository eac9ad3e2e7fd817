use super::*;

/// Tests that makes are listed alphabetically.
///
/// Expected: Ok(Vec<Make>) sorted by name
#[tokio::test]
async fn lists_makes_by_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["Volvo", "Audi", "Kia"] {
        factory::make::MakeFactory::new(db).name(name).build().await?;
    }

    let repo = MakeRepository::new(db);
    let names: Vec<_> = repo.get_all().await?.into_iter().map(|m| m.name).collect();

    assert_eq!(names, vec!["Audi", "Kia", "Volvo"]);

    Ok(())
}

/// Tests loading a subset of makes by id.
///
/// Expected: only the requested makes, and an empty list for no ids
#[tokio::test]
async fn finds_makes_by_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let audi = factory::make::MakeFactory::new(db).name("Audi").build().await?;
    factory::make::MakeFactory::new(db).name("Kia").build().await?;

    let repo = MakeRepository::new(db);
    let found = repo.find_by_ids(vec![audi.id]).await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Audi");
    assert!(repo.find_by_ids(Vec::new()).await?.is_empty());

    Ok(())
}
