// Single source of truth for all default values.

// --- Store ---
pub const DEFAULT_NAMESPACE: &str = "";
pub const DEFAULT_STORE_PATH: &str = "consent-store.json";
pub const DEFAULT_QUOTA_BYTES: u64 = 5_242_880; // 5 MiB

// --- Enforcement ---
pub const DEFAULT_GDPR_ENFORCED: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_DECISION_LOG_CAPACITY: usize = 10_000;
