//! # consent-registry
//!
//! Holds the current permission map and answers "is category X granted?".
//! The map is only ever replaced whole, so readers never see a mix of two
//! policies. Unknown categories and an uninitialized registry are fail-closed.

pub mod diff;
pub mod registry;

pub use diff::PolicyDiff;
pub use registry::ConsentRegistry;
