pub mod consent_source;
pub mod observer;
pub mod storage_medium;

pub use consent_source::IConsentSource;
pub use observer::{IConsentObserver, NoopObserver};
pub use storage_medium::{IAsyncStorageMedium, IStorageMedium};
