//! Type-safe error codes used for logging and monitoring.
//!
//! The code never appears in the response body; it is attached to the `tracing`
//! event emitted when an [`AppError`](super::AppError) is rendered.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidId;
//! assert_eq!(code.as_str(), "INVALID_ID");
//! assert_eq!(code.code(), 1002);
//! ```

use super::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Client errors (1000-1999)
    ValidationError,
    InvalidId,
    InvalidUuid,
    JsonExtraction,
    MultipartExtraction,
    NotFound,
    Conflict,

    // Server errors
    InternalError,
    ServiceUnavailable,

    // Upstream stores (2000-2999)
    DatabaseError,
    DocumentStoreError,
    ImageStoreError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::MultipartExtraction => "MULTIPART_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DocumentStoreError => "DOCUMENT_STORE_ERROR",
            Self::ImageStoreError => "IMAGE_STORE_ERROR",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::InvalidUuid => 1003,
            Self::JsonExtraction => 1004,
            Self::MultipartExtraction => 1005,
            Self::NotFound => 1006,
            Self::Conflict => 1007,
            Self::InternalError => 1500,
            Self::ServiceUnavailable => 1503,
            Self::DatabaseError => 2001,
            Self::DocumentStoreError => 2002,
            Self::ImageStoreError => 2003,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => messages::VALIDATION_FAILED,
            Self::InvalidId => messages::INVALID_ID,
            Self::InvalidUuid => messages::INVALID_UUID,
            Self::JsonExtraction => messages::INVALID_JSON,
            Self::MultipartExtraction => messages::INVALID_MULTIPART,
            Self::NotFound => messages::NOT_FOUND_RESOURCE,
            Self::Conflict => messages::CONFLICT,
            Self::InternalError => messages::INTERNAL_ERROR,
            Self::ServiceUnavailable => messages::SERVICE_UNAVAILABLE,
            Self::DatabaseError => messages::DB_ERROR,
            Self::DocumentStoreError => messages::DOCUMENT_STORE_ERROR,
            Self::ImageStoreError => messages::IMAGE_STORE_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 12] = [
        ErrorCode::ValidationError,
        ErrorCode::InvalidId,
        ErrorCode::InvalidUuid,
        ErrorCode::JsonExtraction,
        ErrorCode::MultipartExtraction,
        ErrorCode::NotFound,
        ErrorCode::Conflict,
        ErrorCode::InternalError,
        ErrorCode::ServiceUnavailable,
        ErrorCode::DatabaseError,
        ErrorCode::DocumentStoreError,
        ErrorCode::ImageStoreError,
    ];

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<_> = ALL.iter().map(|c| c.code()).collect();
        let names: HashSet<_> = ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(codes.len(), ALL.len());
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_store_errors_are_in_2000_range() {
        for code in [
            ErrorCode::DatabaseError,
            ErrorCode::DocumentStoreError,
            ErrorCode::ImageStoreError,
        ] {
            assert!((2000..3000).contains(&code.code()));
        }
    }

    #[test]
    fn test_display_uses_identifier() {
        assert_eq!(ErrorCode::Conflict.to_string(), "CONFLICT");
    }
}
