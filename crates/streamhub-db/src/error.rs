use streamhub_core::AppError;
use thiserror::Error;

/// Credential store failure. Absence of a record is not an error; lookups
/// return `Ok(None)` and updates return `Ok(false)`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Conflict(String),
    #[error("store backend error: {0}")]
    Backend(#[source] sqlx::Error),
}

impl StoreError {
    /// Maps unique-constraint violations onto [`StoreError::Conflict`].
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                let message = match db_err.constraint() {
                    Some(c) if c.contains("email") => "Email is already in use",
                    Some(c) if c.contains("username") => "Username is already taken",
                    _ => "User already exists",
                };
                return StoreError::Conflict(message.to_string());
            }
        }
        StoreError::Backend(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => AppError::conflict(message),
            StoreError::Backend(source) => AppError::internal(source),
        }
    }
}
