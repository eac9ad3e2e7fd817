//! VIN decoding through the NHTSA vPIC API.

use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::server::{
    error::AppError,
    model::vin::{DecodedVin, RegisteredVin},
    service::make::MakeService,
    util::validation::is_valid_vin,
};

/// Response envelope of `decodevinvalues`.
#[derive(Debug, Deserialize)]
struct DecodeResponse {
    #[serde(rename = "Results", default)]
    results: Vec<DecodeResult>,
}

/// The fields used from a flat-format decode result.
#[derive(Debug, Deserialize)]
struct DecodeResult {
    #[serde(rename = "VIN", default)]
    vin: Option<String>,
    #[serde(rename = "Make", default)]
    make: Option<String>,
    #[serde(rename = "Model", default)]
    model: Option<String>,
    #[serde(rename = "ModelYear", default)]
    model_year: Option<String>,
}

pub struct VinService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    api_url: &'a str,
}

impl<'a> VinService<'a> {
    /// Creates a new VinService.
    ///
    /// # Arguments
    /// - `db` - Database connection, used when registering decoded makes and models
    /// - `http_client` - Shared HTTP client
    /// - `api_url` - vPIC base URL, e.g. `https://vpic.nhtsa.dot.gov/api/vehicles`
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        api_url: &'a str,
    ) -> Self {
        Self {
            db,
            http_client,
            api_url,
        }
    }

    /// Decodes a VIN into make, model and year.
    ///
    /// # Returns
    /// - `Ok(DecodedVin)` - Decoder returned a result with a make
    /// - `Err(AppError::BadRequest)` - Malformed VIN, or the decoder knows nothing about it
    /// - `Err(AppError::ReqwestErr)` - Decoder unreachable or returned malformed JSON
    pub async fn decode(&self, vin: &str) -> Result<DecodedVin, AppError> {
        let vin = vin.trim().to_uppercase();
        if !is_valid_vin(&vin) {
            return Err(AppError::BadRequest("Invalid VIN format".to_string()));
        }

        let url = format!(
            "{}/decodevinvalues/{}",
            self.api_url.trim_end_matches('/'),
            vin
        );

        let response = self
            .http_client
            .get(url)
            .query(&[("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .json::<DecodeResponse>()
            .await?;

        let Some(result) = response.results.into_iter().next() else {
            return Err(invalid_vin());
        };

        let make = result.make.unwrap_or_default().trim().to_string();
        if make.is_empty() {
            return Err(invalid_vin());
        }

        Ok(DecodedVin {
            vin: result.vin.filter(|v| !v.is_empty()).unwrap_or(vin),
            make,
            model: result.model.unwrap_or_default().trim().to_string(),
            year: result.model_year.unwrap_or_default().trim().to_string(),
        })
    }

    /// Decodes a VIN and makes sure its make and model exist in the catalog.
    ///
    /// # Returns
    /// - `Ok(RegisteredVin)` - Decoded values with the catalog ids
    /// - `Err(AppError::BadRequest)` - VIN invalid, unknown, or decoded without a model
    pub async fn decode_and_register(&self, vin: &str) -> Result<RegisteredVin, AppError> {
        let decoded = self.decode(vin).await?;
        if decoded.model.is_empty() {
            return Err(invalid_vin());
        }

        let makes = MakeService::new(self.db);
        let make = makes.find_or_create_make(&decoded.make).await?;
        let model = makes.find_or_create_model(&decoded.model, make.id).await?;

        Ok(RegisteredVin {
            decoded: DecodedVin {
                make: make.name,
                model: model.name,
                ..decoded
            },
            make_id: make.id,
            model_id: model.id,
        })
    }
}

fn invalid_vin() -> AppError {
    AppError::BadRequest("Invalid VIN or no data found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::builder::TestBuilder;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    const VIN: &str = "1HGCM82633A004352";

    async fn mock_decoder(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/decodevinvalues/{}", VIN)))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    /// Tests decoding a known VIN.
    ///
    /// Expected: make, model and year from the first result
    #[tokio::test]
    async fn test_decode_known_vin() {
        let server = MockServer::start().await;
        mock_decoder(
            &server,
            serde_json::json!({
                "Count": 1,
                "Results": [{"VIN": VIN, "Make": "HONDA", "Model": "Accord", "ModelYear": "2003"}]
            }),
        )
        .await;

        let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let client = reqwest::Client::new();
        let uri = server.uri();

        let decoded = VinService::new(db, &client, &uri).decode(VIN).await.unwrap();

        assert_eq!(decoded.make, "HONDA");
        assert_eq!(decoded.model, "Accord");
        assert_eq!(decoded.year, "2003");
    }

    /// Tests a VIN the decoder has no make for.
    ///
    /// Expected: Err(BadRequest("Invalid VIN or no data found"))
    #[tokio::test]
    async fn test_decode_without_make_is_rejected() {
        let server = MockServer::start().await;
        mock_decoder(
            &server,
            serde_json::json!({"Results": [{"VIN": VIN, "Make": "", "Model": "", "ModelYear": ""}]}),
        )
        .await;

        let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let client = reqwest::Client::new();
        let uri = server.uri();

        let result = VinService::new(db, &client, &uri).decode(VIN).await;

        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Invalid VIN or no data found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// Tests that malformed VINs never reach the decoder.
    #[tokio::test]
    async fn test_decode_rejects_malformed_vin() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let client = reqwest::Client::new();
        let uri = server.uri();

        let result = VinService::new(db, &client, &uri)
            .decode("1HGCM82633A00435I")
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    /// Tests registering the decoded make and model.
    ///
    /// Expected: normalized catalog names and ids that exist in the database
    #[tokio::test]
    async fn test_decode_and_register_creates_catalog_entries() {
        let server = MockServer::start().await;
        mock_decoder(
            &server,
            serde_json::json!({
                "Results": [{"VIN": VIN, "Make": "HONDA", "Model": "ACCORD", "ModelYear": "2003"}]
            }),
        )
        .await;

        let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let client = reqwest::Client::new();
        let uri = server.uri();

        let registered = VinService::new(db, &client, &uri)
            .decode_and_register(VIN)
            .await
            .unwrap();

        assert_eq!(registered.decoded.make, "Honda");
        assert_eq!(registered.decoded.model, "Accord");

        let makes = MakeService::new(db);
        assert_eq!(makes.get_by_id(registered.make_id).await.unwrap().name, "Honda");
        let models = makes.get_models(registered.make_id).await.unwrap();
        assert_eq!(models[0].id, registered.model_id);
    }
}
