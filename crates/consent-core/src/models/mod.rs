pub mod category_status;
pub mod consent_event;
pub mod permission_map;
pub mod write_options;

pub use category_status::CategoryStatus;
pub use consent_event::{ConsentEvent, ConsentEventKind};
pub use permission_map::PermissionMap;
pub use write_options::WriteOptions;
