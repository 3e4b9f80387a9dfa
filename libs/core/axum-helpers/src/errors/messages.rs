//! Standard messages for consistent error responses.

pub const VALIDATION_FAILED: &str = "Request validation failed.";
pub const INVALID_ID: &str = "Invalid id.";
pub const INVALID_UUID: &str = "Invalid UUID format.";
pub const INVALID_JSON: &str = "Invalid JSON body.";
pub const INVALID_MULTIPART: &str = "Invalid multipart form.";
pub const NOT_FOUND_RESOURCE: &str = "Requested resource was not found.";
pub const NOT_FOUND_ROUTE: &str = "API endpoint not found.";
pub const CONFLICT: &str = "The resource is still referenced.";
pub const INTERNAL_ERROR: &str = "An unexpected error occurred.";
pub const SERVICE_UNAVAILABLE: &str = "Service temporarily unavailable.";
pub const DB_ERROR: &str = "A database error occurred.";
pub const DOCUMENT_STORE_ERROR: &str = "A document store error occurred.";
pub const IMAGE_STORE_ERROR: &str = "An image store error occurred.";
