use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const NHTSA_API_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";
const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const CLOUDINARY_API_URL: &str = "https://api.cloudinary.com/v1_1";

/// Credentials for the Cloudinary account holding vehicle images and documents.
#[derive(Clone, Debug)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_url: String,
}

/// Outgoing mail server settings.
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Super admin account seeded at startup when its email is not registered.
#[derive(Clone, Debug)]
pub struct SuperuserConfig {
    pub email: String,
    pub password: String,
}

pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,
    pub jwt_refresh_secret: String,
    pub verification_token_secret: String,
    pub reset_password_token_secret: String,

    pub nhtsa_api_url: String,
    pub google_geocode_url: String,
    pub google_maps_api_key: Option<String>,

    pub cloudinary: Option<CloudinaryConfig>,
    pub smtp: Option<SmtpConfig>,
    pub superuser: Option<SuperuserConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: match optional("PORT") {
                Some(value) => parse_port("PORT", value)?,
                None => DEFAULT_PORT,
            },
            frontend_url: optional("FRONTEND_URL")
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            jwt_secret: required("JWT_SECRET")?,
            jwt_refresh_secret: required("JWT_REFRESH_SECRET")?,
            verification_token_secret: required("VERIFICATION_TOKEN_SECRET")?,
            reset_password_token_secret: required("RESET_PASSWORD_TOKEN_SECRET")?,
            nhtsa_api_url: optional("NHTSA_API_URL").unwrap_or_else(|| NHTSA_API_URL.to_string()),
            google_geocode_url: optional("GOOGLE_GEOCODE_URL")
                .unwrap_or_else(|| GOOGLE_GEOCODE_URL.to_string()),
            google_maps_api_key: optional("GOOGLE_MAPS_API_KEY"),
            cloudinary: Self::cloudinary_from_env(),
            smtp: Self::smtp_from_env()?,
            superuser: match (optional("SUPERUSER_EMAIL"), optional("SUPERUSER_PASSWORD")) {
                (Some(email), Some(password)) => Some(SuperuserConfig { email, password }),
                _ => None,
            },
        })
    }

    /// Cloudinary is enabled only when all three credentials are present.
    fn cloudinary_from_env() -> Option<CloudinaryConfig> {
        Some(CloudinaryConfig {
            cloud_name: optional("CLOUDINARY_CLOUD_NAME")?,
            api_key: optional("CLOUDINARY_API_KEY")?,
            api_secret: optional("CLOUDINARY_API_SECRET")?,
            api_url: optional("CLOUDINARY_API_URL")
                .unwrap_or_else(|| CLOUDINARY_API_URL.to_string()),
        })
    }

    fn smtp_from_env() -> Result<Option<SmtpConfig>, AppError> {
        let Some(host) = optional("SMTP_HOST") else {
            return Ok(None);
        };

        let port = match optional("SMTP_PORT") {
            Some(value) => parse_port("SMTP_PORT", value)?,
            None => 587,
        };

        Ok(Some(SmtpConfig {
            host,
            port,
            username: optional("SMTP_USER").unwrap_or_default(),
            password: optional("SMTP_PASS").unwrap_or_default(),
        }))
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Unset and empty variables are both treated as absent.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(name: &str, value: String) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}
