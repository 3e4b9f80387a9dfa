//! Custom extractors for Axum handlers.
//!
//! Every rejection is rendered through [`AppError`](crate::errors::AppError), so
//! malformed input yields the same `{success: false, ...}` envelope as handler errors.

pub mod id_path;
pub mod uuid_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
