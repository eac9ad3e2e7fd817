use crate::server::{data::customer::CustomerRepository, model::customer::CustomerParams};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_all;
mod search_by_email;
mod upsert_by_email;

fn params(email: &str) -> CustomerParams {
    CustomerParams {
        email: email.to_string(),
        first_name: "Aram".to_string(),
        last_name: "Hakobyan".to_string(),
        phone_number: "+37491123456".to_string(),
    }
}
