use crate::server::data::vehicle_image::VehicleImageRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
