//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request
//! handler through Axum's state extraction. Every field is cheap to clone: the
//! database connection and HTTP client are pools, and the services hold `Arc`s.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::service::{mail::MailService, storage::FileStorage, token::TokenService};

/// Base URLs and keys of the third-party lookup APIs.
#[derive(Clone, Debug)]
pub struct LookupApis {
    /// NHTSA vPIC base URL used for VIN decoding.
    pub nhtsa_api_url: String,
    /// Google Geocoding endpoint.
    pub google_geocode_url: String,
    pub google_maps_api_key: Option<String>,
}

/// Application state containing shared resources and dependencies.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for VIN decoding, geocoding and file storage requests.
    pub http_client: reqwest::Client,

    /// Signs and verifies access, refresh, verification and reset tokens.
    pub tokens: TokenService,

    /// Sends invitation, password reset and account deletion emails.
    pub mail: MailService,

    /// Cloud storage for vehicle images and customer documents.
    pub storage: Arc<dyn FileStorage>,

    pub apis: LookupApis,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `http_client` - HTTP client for external API requests
    /// - `tokens` - JWT signing service
    /// - `mail` - Email service
    /// - `storage` - File storage backend
    /// - `apis` - Third-party lookup API settings
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        tokens: TokenService,
        mail: MailService,
        storage: Arc<dyn FileStorage>,
        apis: LookupApis,
    ) -> Self {
        Self {
            db,
            http_client,
            tokens,
            mail,
            storage,
            apis,
        }
    }
}
