//! Forward and reverse geocoding through the Google Geocoding API.
//!
//! Both lookups return an empty string when no API key is configured or Google has
//! no result, so callers can treat coordinates and addresses as best-effort.

use serde::Deserialize;

use crate::server::error::AppError;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: String,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

pub struct GeoService<'a> {
    http_client: &'a reqwest::Client,
    api_url: &'a str,
    api_key: Option<&'a str>,
}

impl<'a> GeoService<'a> {
    pub fn new(http_client: &'a reqwest::Client, api_url: &'a str, api_key: Option<&'a str>) -> Self {
        Self {
            http_client,
            api_url,
            api_key,
        }
    }

    /// Looks up the coordinates of a free-form address.
    ///
    /// # Returns
    /// - `Ok(String)` - `"lat,lng"`, or empty when nothing was found
    /// - `Err(AppError::ReqwestErr)` - Google unreachable or returned malformed JSON
    pub async fn coordinates_from_address(&self, address: &str) -> Result<String, AppError> {
        let address = address.trim();
        if address.is_empty() {
            return Ok(String::new());
        }

        let Some(result) = self.first_result(("address", address.to_string())).await? else {
            return Ok(String::new());
        };

        Ok(result
            .geometry
            .map(|g| format!("{},{}", g.location.lat, g.location.lng))
            .unwrap_or_default())
    }

    /// Looks up the formatted address closest to a coordinate pair.
    ///
    /// # Returns
    /// - `Ok(String)` - Formatted address, or empty when nothing was found
    /// - `Err(AppError::ReqwestErr)` - Google unreachable or returned malformed JSON
    pub async fn address_from_coordinates(&self, lat: f64, lng: f64) -> Result<String, AppError> {
        let Some(result) = self
            .first_result(("latlng", format!("{},{}", lat, lng)))
            .await?
        else {
            return Ok(String::new());
        };

        Ok(result.formatted_address)
    }

    async fn first_result(
        &self,
        query: (&str, String),
    ) -> Result<Option<GeocodeResult>, AppError> {
        let Some(api_key) = self.api_key else {
            tracing::debug!("GOOGLE_MAPS_API_KEY not set, skipping geocoding");
            return Ok(None);
        };

        let response = self
            .http_client
            .get(self.api_url)
            .query(&[(query.0, query.1.as_str()), ("key", api_key)])
            .send()
            .await?
            .error_for_status()?
            .json::<GeocodeResponse>()
            .await?;

        Ok(response.results.into_iter().next())
    }
}

/// Splits a `"lat,lng"` string into its two numbers.
pub fn parse_coordinates(value: &str) -> Option<(f64, f64)> {
    let (lat, lng) = value.split_once(',')?;
    Some((lat.trim().parse().ok()?, lng.trim().parse().ok()?))
}
