//! Storage-specific error type wrapping sqlx errors.

use smarthome_domain::error::SmartHomeError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// The database directory could not be created.
    #[error("database directory error")]
    Io(#[from] std::io::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for SmartHomeError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
