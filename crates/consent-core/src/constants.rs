/// Consent client version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Well-known consent categories. The server may send any others.
pub mod categories {
    pub const MARKETING: &str = "marketing";
    pub const LOGGING: &str = "logging";
    pub const STABILITY: &str = "stability";
    pub const ADVERTISING: &str = "advertising";

    /// All well-known categories, in display order.
    pub const ALL: [&str; 4] = [MARKETING, LOGGING, STABILITY, ADVERTISING];
}

/// Separator between a store namespace and the caller's key.
pub const NAMESPACE_SEPARATOR: char = ':';
