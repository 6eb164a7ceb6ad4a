use super::error_code::{self, ConsentErrorCode};

/// Failures of the underlying storage medium, independent of consent.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("quota exceeded: write needs {used} bytes, limit is {limit}")]
    QuotaExceeded { used: u64, limit: u64 },

    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("storage corrupted: {details}")]
    Corrupted { details: String },
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl ConsentErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::QuotaExceeded { .. } => error_code::QUOTA_EXCEEDED,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
