//! Cloud file storage for vehicle images and customer documents.
//!
//! `CloudinaryStorage` uploads through Cloudinary's signed REST API. Each request is
//! signed with the SHA-1 hex digest of its sorted parameters followed by the API secret.

use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::sync::LazyLock;

use crate::server::{
    config::CloudinaryConfig,
    error::{internal::InternalError, AppError},
    model::upload::UploadedFile,
};

static VEHICLE_PUBLIC_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/vehicles/([^.]+)").expect("valid public id regex"));

/// Stores uploaded files and returns their public URL.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Uploads `file` into `folder`, returning its secure URL.
    async fn upload(&self, folder: &str, file: &UploadedFile) -> Result<String, AppError>;

    /// Removes a stored image by its public id.
    async fn destroy(&self, public_id: &str) -> Result<(), AppError>;
}

/// Public id of a vehicle image URL: `vehicles/<name>` for `.../vehicles/<name>.<ext>`.
pub fn extract_public_id(url: &str) -> Option<String> {
    VEHICLE_PUBLIC_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("vehicles/{}", m.as_str()))
}

/// SHA-1 hex signature over `params` (sorted by key, joined as `k=v&...`) plus the secret.
pub fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(format!("{}{}", to_sign, api_secret).as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Cloudinary-backed storage.
pub struct CloudinaryStorage {
    http_client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryStorage {
    pub fn new(http_client: reqwest::Client, config: CloudinaryConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn endpoint(&self, resource_type: &str, action: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.cloud_name,
            resource_type,
            action
        )
    }
}

#[async_trait]
impl FileStorage for CloudinaryStorage {
    async fn upload(&self, folder: &str, file: &UploadedFile) -> Result<String, AppError> {
        let resource_type = if file.is_image() { "image" } else { "raw" };
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", folder.to_string()), ("timestamp", timestamp.clone())],
            &self.config.api_secret,
        );

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature);

        let response = self
            .http_client
            .post(self.endpoint(resource_type, "upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(InternalError::Storage(format!(
                "upload of {} failed with {}: {}",
                file.file_name, status, body
            ))
            .into());
        }

        let uploaded = response.json::<UploadResponse>().await?;

        Ok(uploaded.secure_url)
    }

    async fn destroy(&self, public_id: &str) -> Result<(), AppError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[
                ("public_id", public_id.to_string()),
                ("timestamp", timestamp.clone()),
            ],
            &self.config.api_secret,
        );

        let form = Form::new()
            .text("public_id", public_id.to_string())
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature);

        let response = self
            .http_client
            .post(self.endpoint("image", "destroy"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(InternalError::Storage(format!(
                "destroy of {} failed with {}",
                public_id,
                response.status()
            ))
            .into());
        }

        Ok(())
    }
}

/// Storage used when Cloudinary credentials are absent; every call fails.
pub struct UnconfiguredStorage;

#[async_trait]
impl FileStorage for UnconfiguredStorage {
    async fn upload(&self, _folder: &str, _file: &UploadedFile) -> Result<String, AppError> {
        Err(InternalError::Storage("Cloudinary is not configured".to_string()).into())
    }

    async fn destroy(&self, _public_id: &str) -> Result<(), AppError> {
        Err(InternalError::Storage("Cloudinary is not configured".to_string()).into())
    }
}

/// In-memory storage recording uploads and deletions.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingStorage {
    uploads: std::sync::Arc<std::sync::Mutex<Vec<(String, String)>>>,
    destroyed: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

#[cfg(test)]
impl RecordingStorage {
    /// `(folder, file name)` of each upload.
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl FileStorage for RecordingStorage {
    async fn upload(&self, folder: &str, file: &UploadedFile) -> Result<String, AppError> {
        self.uploads
            .lock()
            .unwrap()
            .push((folder.to_string(), file.file_name.clone()));
        Ok(format!("https://storage.test/{}/{}", folder, file.file_name))
    }

    async fn destroy(&self, public_id: &str) -> Result<(), AppError> {
        self.destroyed.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}
