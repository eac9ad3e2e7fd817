use crate::server::data::make::MakeRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find_by_name_ci;
mod get_all;
