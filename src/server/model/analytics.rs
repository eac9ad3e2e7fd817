use crate::model::analytics::AnalyticsDto;

/// Dashboard counters over non-deleted rows.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSummary {
    pub total_vehicles: u64,
    pub total_customers: u64,
    pub vehicles_sold: u64,
}

impl AnalyticsSummary {
    pub fn into_dto(self) -> AnalyticsDto {
        AnalyticsDto {
            total_vehicles: self.total_vehicles,
            total_customers: self.total_customers,
            vehicles_sold: self.vehicles_sold,
        }
    }
}
