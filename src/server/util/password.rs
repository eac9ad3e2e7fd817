use rand::{distr::Alphanumeric, Rng};

use crate::server::error::{internal::InternalError, AppError};

/// bcrypt work factor for stored password hashes.
pub const HASH_COST: u32 = 10;

/// Hashes `password` on the blocking thread pool.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();

    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, HASH_COST))
        .await
        .map_err(|e| InternalError::PasswordHash(e.to_string()))??;

    Ok(hash)
}

/// Checks `password` against a stored hash on the blocking thread pool.
///
/// Malformed hashes never match.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let hash = hash.to_string();

    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?;

    Ok(matches.unwrap_or(false))
}

/// Random password for invited accounts, which only become usable after activation.
pub fn random_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
