use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct MakeDto {
    pub id: i32,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct VehicleModelDto {
    pub id: i32,
    pub name: String,
    pub make_id: i32,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MakeIdDto {
    pub make_id: i32,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ModelIdDto {
    pub model_id: i32,
}
