use thiserror::Error;

/// Failures of collaborators the request cannot recover from.
///
/// Every variant results in a 500 Internal Server Error with a generic message
/// returned to the client; the detail is only logged.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Cloud storage rejected an upload or deletion, or is not configured.
    #[error("File storage error: {0}")]
    Storage(String),

    /// SMTP transport or message building failed.
    #[error("Mail delivery error: {0}")]
    Mail(String),

    /// CSV export could not be written.
    #[error("CSV encoding error: {0}")]
    CsvEncode(String),

    /// bcrypt hashing or verification failed.
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// JWT signing failed.
    #[error("Token signing error: {0}")]
    TokenSigning(String),
}
