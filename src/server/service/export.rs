//! CSV export of the inventory or of a user's favorites.
//!
//! The file starts with two quoted metadata lines (active filters and export time)
//! and a blank line, followed by a fully quoted CSV table.

use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use entity::sea_orm_active_enums::VehicleStatus;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::vehicle::VehicleRepository,
    error::{internal::InternalError, AppError},
    model::{
        export::{CsvExport, ExportKind, ExportRow},
        vehicle::{VehicleDetail, VehicleFilter},
    },
    service::vehicle::load_details,
};

const HEADER: [&str; 7] = [
    "Make",
    "Model",
    "VIN",
    "Year",
    "Location",
    "Coordinates",
    "Status",
];

pub struct ExportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ExportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the CSV export of the vehicles matching `filter`.
    ///
    /// # Arguments
    /// - `user_id` - Caller, whose favorites are exported for `ExportKind::Favorites`
    /// - `kind` - Whole inventory or favorites only
    /// - `filter` - Same filters as the vehicle list
    ///
    /// # Returns
    /// - `Ok(CsvExport)` - File name and content
    /// - `Err(AppError::NotFound)` - Nothing to export
    /// - `Err(AppError::BadRequest)` - Model filter without a make
    pub async fn export(
        &self,
        user_id: Uuid,
        kind: ExportKind,
        filter: VehicleFilter,
    ) -> Result<CsvExport, AppError> {
        filter.validate()?;

        let favorites_of = match kind {
            ExportKind::Vehicles => None,
            ExportKind::Favorites => Some(user_id),
        };

        let vehicles = VehicleRepository::new(self.db)
            .get_filtered(&filter, favorites_of)
            .await?;
        if vehicles.is_empty() {
            return Err(AppError::NotFound(kind.empty_message().to_string()));
        }

        let rows: Vec<ExportRow> = load_details(self.db, user_id, vehicles)
            .await?
            .into_iter()
            .map(export_row)
            .collect();

        let now = Utc::now();
        let content = render(&filter, &rows, now)
            .map_err(|err| InternalError::CsvEncode(err.to_string()))?;

        tracing::info!(rows = rows.len(), ?kind, "Vehicles exported");

        Ok(CsvExport {
            filename: kind.filename(now),
            content,
        })
    }
}

fn export_row(detail: VehicleDetail) -> ExportRow {
    let vehicle = detail.vehicle;
    let location = [
        &vehicle.street,
        &vehicle.city,
        &vehicle.state,
        &vehicle.country,
    ]
    .into_iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    ExportRow {
        make: or_placeholder(&detail.make.name, "Unknown Make"),
        model: or_placeholder(&detail.model.name, "Unknown Model"),
        vin: or_placeholder(&vehicle.vin, "N/A"),
        year: or_placeholder(&vehicle.year, "N/A"),
        location: or_placeholder(&location, "No location provided"),
        coordinates: or_placeholder(&vehicle.location, "No coordinates"),
        status: match vehicle.status {
            VehicleStatus::InStock => "In Stock",
            VehicleStatus::Sold => "Sold",
        }
        .to_string(),
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Renders the metadata lines and the quoted table.
fn render(
    filter: &VehicleFilter,
    rows: &[ExportRow],
    at: DateTime<Utc>,
) -> Result<String, csv::Error> {
    let mut out = String::new();
    out.push_str(&quoted(&format!("Filtered by: {}", filter.describe())));
    out.push_str(&quoted(&format!(
        "Exported at: {}",
        at.format("%Y-%m-%d %H:%M:%S UTC")
    )));
    out.push('\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record([
            &row.make,
            &row.model,
            &row.vin,
            &row.year,
            &row.location,
            &row.coordinates,
            &row.status,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    out.push_str(&String::from_utf8_lossy(&bytes));

    Ok(out)
}

fn quoted(line: &str) -> String {
    format!("\"{}\"\n", line.replace('"', "\"\""))
}
