use super::*;

/// Tests soft-deleting a document.
///
/// Expected: Ok(true) once, then Ok(false) for the already deleted document
#[tokio::test]
async fn deletes_document_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_customer(db).await?;
    let document = factory::document::DocumentFactory::new(db)
        .customer_id(Some(customer.id))
        .build()
        .await?;

    let repo = DocumentRepository::new(db);

    assert!(repo.soft_delete(document.id).await?);
    assert!(!repo.soft_delete(document.id).await?);
    assert!(repo.get_by_customer(customer.id).await?.is_empty());

    Ok(())
}

/// Tests deleting an unknown document.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_document() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DocumentRepository::new(db);

    assert!(!repo.soft_delete(uuid::Uuid::new_v4()).await?);

    Ok(())
}
