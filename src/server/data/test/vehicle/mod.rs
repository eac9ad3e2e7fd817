use crate::server::{
    data::vehicle::VehicleRepository,
    model::vehicle::{VehicleFilter, VehicleParams},
};
use entity::sea_orm_active_enums::VehicleStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod assign_customer;
mod create;
mod get_filtered;
mod get_map_points;
mod get_paginated;
mod soft_delete;
mod update;
mod vin_exists;

fn params(model_id: i32, vin: &str) -> VehicleParams {
    VehicleParams {
        model_id,
        make_id: None,
        vin: vin.to_string(),
        year: "2021".to_string(),
        street: "12 Abovyan St".to_string(),
        city: "Yerevan".to_string(),
        state: "Yerevan".to_string(),
        country: "Armenia".to_string(),
        zipcode: "0001".to_string(),
        status: VehicleStatus::InStock,
        location: "40.18,44.51".to_string(),
    }
}
