use axum::extract::{multipart::MultipartError, Multipart};
use std::collections::HashMap;

use crate::server::{error::AppError, model::upload::UploadedFile};

/// Fully buffered `multipart/form-data` body.
///
/// Parts with a filename are kept as files, every other part as text. Repeated
/// names keep all values in arrival order.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, Vec<String>>,
    files: Vec<(String, UploadedFile)>,
}

impl MultipartForm {
    /// Reads every part of the request body.
    ///
    /// # Returns
    /// - `Ok(MultipartForm)` - All parts buffered
    /// - `Err(AppError::BadRequest)` - Malformed body or a part exceeding the body limit
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(bad_body)? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(bad_body)?;

                    form.files.push((
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    ));
                }
                None => {
                    let value = field.text().await.map_err(bad_body)?;
                    form.fields.entry(name).or_default().push(value);
                }
            }
        }

        Ok(form)
    }

    /// First value of a text part, trimmed, `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// All values sent under `name` or `name[]`.
    pub fn texts(&self, name: &str) -> Vec<String> {
        let bracketed = format!("{}[]", name);
        [name, bracketed.as_str()]
            .iter()
            .filter_map(|key| self.fields.get(*key))
            .flatten()
            .cloned()
            .collect()
    }

    /// Removes and returns the files uploaded under `name`.
    pub fn take_files(&mut self, name: &str) -> Vec<UploadedFile> {
        let (matching, rest): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.files).into_iter().partition(|(n, _)| n == name);
        self.files = rest;
        matching.into_iter().map(|(_, file)| file).collect()
    }
}

fn bad_body(err: MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
}
