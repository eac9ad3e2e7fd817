use super::*;

/// Tests storing document metadata for a customer and vehicle.
///
/// Expected: Ok(Document) listed under both owners
#[tokio::test]
async fn creates_document_for_customer_and_vehicle() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, _make, _model, vehicle) = factory::create_vehicle_with_dependencies(db).await?;
    let customer = factory::create_customer(db).await?;

    let repo = DocumentRepository::new(db);
    let document = repo
        .create(CreateDocumentParams {
            name: "contract.pdf".to_string(),
            category: DocumentCategory::Contract,
            customer_id: Some(customer.id),
            vehicle_id: Some(vehicle.id),
            file_url: "https://cdn.example.com/customers/contract.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size: 2048,
        })
        .await?;

    assert_eq!(document.category, DocumentCategory::Contract);
    assert_eq!(document.size, 2048);

    let by_customer = repo.get_by_customer(customer.id).await?;
    let by_vehicle = repo.get_by_vehicle(vehicle.id).await?;
    assert_eq!(by_customer.iter().map(|d| d.id).collect::<Vec<_>>(), vec![document.id]);
    assert_eq!(by_vehicle.iter().map(|d| d.id).collect::<Vec<_>>(), vec![document.id]);

    Ok(())
}
