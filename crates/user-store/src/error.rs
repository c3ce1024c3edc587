use thiserror::Error;

/// Errors that can occur when talking to the user store.
///
/// A missing record is not an error: lookups, updates and deletes
/// report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum UserStoreError {
    /// A database error occurred, including an unreachable backend.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for user store operations.
pub type Result<T> = std::result::Result<T, UserStoreError>;
