use super::*;
use chrono::{Duration, Utc};

/// Tests listing a customer's documents newest first without deleted ones.
///
/// Expected: newer document before older, deleted and foreign documents left out
#[tokio::test]
async fn lists_customer_documents_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_customer(db).await?;
    let other = factory::create_customer(db).await?;
    let now = Utc::now();

    let older = factory::document::DocumentFactory::new(db)
        .customer_id(Some(customer.id))
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    let newer = factory::document::DocumentFactory::new(db)
        .customer_id(Some(customer.id))
        .created_at(now - Duration::days(1))
        .build()
        .await?;
    factory::document::DocumentFactory::new(db)
        .customer_id(Some(customer.id))
        .deleted()
        .build()
        .await?;
    factory::document::DocumentFactory::new(db)
        .customer_id(Some(other.id))
        .build()
        .await?;

    let repo = DocumentRepository::new(db);
    let documents = repo.get_by_customer(customer.id).await?;

    assert_eq!(
        documents.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );

    Ok(())
}

/// Tests listing the documents of a vehicle.
///
/// Expected: only documents linked to that vehicle
#[tokio::test]
async fn lists_vehicle_documents() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, _make, _model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;
    let linked = factory::document::DocumentFactory::new(db)
        .vehicle_id(Some(vehicle.id))
        .category(DocumentCategory::Insurance)
        .build()
        .await?;
    factory::create_document(db).await?;

    let repo = DocumentRepository::new(db);
    let documents = repo.get_by_vehicle(vehicle.id).await?;

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, linked.id);
    assert_eq!(documents[0].category, DocumentCategory::Insurance);

    Ok(())
}
