//! Error handling for the consent client.
//! One error enum per concern, `thiserror` only.

pub mod consent_error;
pub mod error_code;
pub mod storage_error;

pub use consent_error::{ConsentError, ConsentResult};
pub use error_code::ConsentErrorCode;
pub use storage_error::StorageError;
