use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    pub total_vehicles: u64,
    pub total_customers: u64,
    pub vehicles_sold: u64,
}
