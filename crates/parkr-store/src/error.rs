use thiserror::Error;

/// Errors produced by the store layer.
///
/// Reads never surface these: a missing or corrupt collection degrades to its
/// default. Only writes and credential hashing can fail.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite backend error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized before writing.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Password hashing or verification failed.
    #[error("Credential error: {0}")]
    Credential(#[from] bcrypt::BcryptError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
