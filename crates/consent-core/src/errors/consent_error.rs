use super::error_code::{self, ConsentErrorCode};
use super::StorageError;

/// Top-level error for every consent and storage operation.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum ConsentError {
    /// The category is not granted. Recoverable: ask for permission, then retry.
    #[error("consent denied for category '{category}'")]
    ConsentDenied { category: String },

    /// The category is absent from the policy. Only raised when the store
    /// distinguishes unknown categories from denied ones.
    #[error("unknown consent category '{category}'")]
    UnknownCategory { category: String },

    /// An uncategorized write was attempted while such writes are rejected.
    #[error("write to '{key}' requires a consent category")]
    CategoryRequired { key: String },

    /// The medium failed for reasons unrelated to consent.
    #[error("storage failure: {0}")]
    StorageFailure(#[from] StorageError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl ConsentError {
    /// True for outcomes a permission-request flow can resolve.
    /// Storage and serialization failures are never consent denials.
    pub fn is_consent_denial(&self) -> bool {
        matches!(
            self,
            Self::ConsentDenied { .. } | Self::UnknownCategory { .. }
        )
    }

    /// The category that caused a denial, if any.
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::ConsentDenied { category } | Self::UnknownCategory { category } => {
                Some(category)
            }
            _ => None,
        }
    }
}

impl ConsentErrorCode for ConsentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConsentDenied { .. } => error_code::CONSENT_DENIED,
            Self::UnknownCategory { .. } => error_code::UNKNOWN_CATEGORY,
            Self::CategoryRequired { .. } => error_code::CATEGORY_REQUIRED,
            Self::StorageFailure(e) => e.error_code(),
            Self::SerializationError(_) => error_code::SERIALIZATION_ERROR,
            Self::ConfigError { .. } => error_code::CONFIG_ERROR,
        }
    }
}

pub type ConsentResult<T> = Result<T, ConsentError>;
