//! Stable string codes for errors, for logging collaborators and bindings.

pub const CONSENT_DENIED: &str = "CONSENT_DENIED";
pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
pub const CATEGORY_REQUIRED: &str = "CATEGORY_REQUIRED";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const QUOTA_EXCEEDED: &str = "QUOTA_EXCEEDED";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

/// Maps an error to a stable code that survives message rewording.
pub trait ConsentErrorCode {
    fn error_code(&self) -> &'static str;
}
