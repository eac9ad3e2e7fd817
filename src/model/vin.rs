use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DecodedVinDto {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: String,
}
