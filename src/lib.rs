// Payment Register - Core Library
// Collaborator records in a local JSON file: masking, validation, storage, listing

pub mod app;
pub mod config;
pub mod listing;
pub mod logging;
pub mod mask;
pub mod record;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use app::{AppState, Focus, FormState, Notice, NoticeLevel};
pub use config::AppConfig;
pub use listing::{build_listing, current_month, is_birthday_month, ListingRow};
pub use mask::{apply_mask, mask_date, DateField, MaskOutcome};
pub use record::CollaboratorRecord;
pub use store::{RecordStore, StoreError};
pub use validation::{parse_date, validate_date, validate_record, ValidationError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
