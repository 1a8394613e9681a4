/// Errors that can occur within the storage layer.
///
/// # Examples
///
/// ```rust
/// use floodwatch_storage::error::StorageError;
///
/// let err = StorageError::NotFound {
///     entity: "flood_alert",
///     id: "alert-99".to_string(),
/// };
/// assert!(err.to_string().contains("flood_alert"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A required record was not found in the database.
    #[error("Storage: {entity} not found (id={id})")]
    NotFound { entity: &'static str, id: String },

    /// An underlying database error.
    #[error("Storage: database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    /// JSON serialization or deserialization failure (e.g. the safe-zone
    /// `location` column).
    #[error("Storage: JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;
