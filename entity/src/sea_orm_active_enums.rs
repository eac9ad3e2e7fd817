use sea_orm::entity::prelude::*;

/// Account role stored on `users.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UserRole {
    #[sea_orm(string_value = "SUPER_ADMIN")]
    SuperAdmin,
    #[sea_orm(string_value = "USER")]
    User,
}

/// Sale state stored on `vehicles.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum VehicleStatus {
    #[sea_orm(string_value = "in stock")]
    InStock,
    #[sea_orm(string_value = "sold")]
    Sold,
}

/// Kind of file stored on `documents.category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum DocumentCategory {
    #[sea_orm(string_value = "contract")]
    Contract,
    #[sea_orm(string_value = "insurance")]
    Insurance,
    #[sea_orm(string_value = "vehicle_registration")]
    VehicleRegistration,
    #[sea_orm(string_value = "identification")]
    Identification,
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    #[sea_orm(string_value = "other")]
    Other,
}
