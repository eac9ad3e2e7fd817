use crate::server::{
    data::user::UserRepository,
    model::user::{GetUsersParams, NewUserParams, UpdateProfileParams},
};
use entity::sea_orm_active_enums::UserRole;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod find_by_email;
mod get_paginated;
mod set_force_logout;
mod update_profile;
