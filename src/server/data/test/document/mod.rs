use crate::server::{data::document::DocumentRepository, model::document::CreateDocumentParams};
use entity::sea_orm_active_enums::DocumentCategory;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_by_owner;
mod soft_delete;
