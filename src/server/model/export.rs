//! CSV export domain models.

use chrono::{DateTime, Utc};

use crate::server::error::AppError;

/// Which vehicles an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Whole inventory matching the filter.
    Vehicles,
    /// Only the caller's favorites matching the filter.
    Favorites,
}

impl ExportKind {
    /// Parses the `type` query parameter, defaulting to `vehicles`.
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(str::trim) {
            None | Some("") | Some("vehicles") => Ok(Self::Vehicles),
            Some("favorites") => Ok(Self::Favorites),
            Some(other) => Err(AppError::BadRequest(format!(
                "Invalid export type: {}",
                other
            ))),
        }
    }

    /// Attachment name for an export generated at `at`.
    pub fn filename(&self, at: DateTime<Utc>) -> String {
        let prefix = match self {
            Self::Vehicles => "vehicles",
            Self::Favorites => "favorite-vehicles",
        };
        format!("{}_{}.csv", prefix, at.format("%Y-%m-%d"))
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            Self::Vehicles => "No vehicles found matching the criteria",
            Self::Favorites => "No favorite vehicles found",
        }
    }
}

/// One exported line with every placeholder already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub make: String,
    pub model: String,
    pub vin: String,
    pub year: String,
    pub location: String,
    pub coordinates: String,
    pub status: String,
}

/// Rendered CSV file ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}
