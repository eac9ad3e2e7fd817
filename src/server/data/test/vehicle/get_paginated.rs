use super::*;
use chrono::{Duration, Utc};

/// Tests paging through vehicles newest first.
///
/// Expected: the second page holds the oldest vehicle and total counts all of them
#[tokio::test]
async fn pages_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (_make, model) = factory::create_make_with_model(db).await?;
    let now = Utc::now();
    let oldest = factory::vehicle::VehicleFactory::new(db, model.id, user.id)
        .created_at(now - Duration::days(3))
        .build()
        .await?;
    let middle = factory::vehicle::VehicleFactory::new(db, model.id, user.id)
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    let newest = factory::vehicle::VehicleFactory::new(db, model.id, user.id)
        .created_at(now - Duration::days(1))
        .build()
        .await?;

    let repo = VehicleRepository::new(db);
    let filter = VehicleFilter::default();

    let (first, total) = repo.get_paginated(&filter, 1, 2).await?;
    let (second, _) = repo.get_paginated(&filter, 2, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(
        first.iter().map(|v| v.id).collect::<Vec<_>>(),
        vec![newest.id, middle.id]
    );
    assert_eq!(second.iter().map(|v| v.id).collect::<Vec<_>>(), vec![oldest.id]);

    Ok(())
}

/// Tests the free-text search across make, model, year and VIN.
///
/// Expected: each search term matches only the vehicle carrying it
#[tokio::test]
async fn searches_catalog_names_year_and_vin() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let toyota = factory::make::MakeFactory::new(db).name("Toyota").build().await?;
    let camry = factory::vehicle_model::VehicleModelFactory::new(db, toyota.id)
        .name("Camry")
        .build()
        .await?;
    let bmw = factory::make::MakeFactory::new(db).name("BMW").build().await?;
    let x5 = factory::vehicle_model::VehicleModelFactory::new(db, bmw.id)
        .name("X5")
        .build()
        .await?;

    let camry_vehicle = factory::vehicle::VehicleFactory::new(db, camry.id, user.id)
        .year("2018")
        .vin("4T1BF1FK5CU123456")
        .build()
        .await?;
    let x5_vehicle = factory::vehicle::VehicleFactory::new(db, x5.id, user.id)
        .year("2022")
        .vin("5UXCR6C05N9K12345")
        .build()
        .await?;

    let repo = VehicleRepository::new(db);
    let search = |term: &str| VehicleFilter {
        search: Some(term.to_string()),
        ..Default::default()
    };

    let (by_make, _) = repo.get_paginated(&search("toyo"), 1, 10).await?;
    assert_eq!(by_make.iter().map(|v| v.id).collect::<Vec<_>>(), vec![camry_vehicle.id]);

    let (by_model, _) = repo.get_paginated(&search("x5"), 1, 10).await?;
    assert_eq!(by_model.iter().map(|v| v.id).collect::<Vec<_>>(), vec![x5_vehicle.id]);

    let (by_year, _) = repo.get_paginated(&search("2018"), 1, 10).await?;
    assert_eq!(by_year.iter().map(|v| v.id).collect::<Vec<_>>(), vec![camry_vehicle.id]);

    let (by_vin, _) = repo.get_paginated(&search("9k123"), 1, 10).await?;
    assert_eq!(by_vin.iter().map(|v| v.id).collect::<Vec<_>>(), vec![x5_vehicle.id]);

    Ok(())
}

/// Tests the make, model and availability filters together.
///
/// Expected: only the in-stock Camry matches
#[tokio::test]
async fn filters_by_make_models_and_availability() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let toyota = factory::make::MakeFactory::new(db).name("Toyota").build().await?;
    let camry = factory::vehicle_model::VehicleModelFactory::new(db, toyota.id)
        .name("Camry")
        .build()
        .await?;
    let rav4 = factory::vehicle_model::VehicleModelFactory::new(db, toyota.id)
        .name("RAV4")
        .build()
        .await?;

    let in_stock = factory::vehicle::VehicleFactory::new(db, camry.id, user.id)
        .build()
        .await?;
    factory::vehicle::VehicleFactory::new(db, camry.id, user.id)
        .status(VehicleStatus::Sold)
        .build()
        .await?;
    factory::vehicle::VehicleFactory::new(db, rav4.id, user.id)
        .build()
        .await?;
    factory::vehicle::VehicleFactory::new(db, camry.id, user.id)
        .deleted()
        .build()
        .await?;

    let repo = VehicleRepository::new(db);
    let filter = VehicleFilter {
        search: None,
        make: Some("toyota".to_string()),
        models: vec!["Camry".to_string()],
        availability: Some("In Stock".to_string()),
    };

    let (vehicles, total) = repo.get_paginated(&filter, 1, 10).await?;

    assert_eq!(total, 1);
    assert_eq!(vehicles[0].id, in_stock.id);

    Ok(())
}
