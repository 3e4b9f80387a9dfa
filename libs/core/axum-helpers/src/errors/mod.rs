pub mod codes;
pub mod handlers;
pub mod messages;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_config::Environment;
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Error envelope returned for every failed request.
///
/// ```json
/// { "success": false, "message": "Product not found." }
/// ```
///
/// `error` carries the raw upstream error text and is only filled outside production.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Human-readable message
    pub message: String,
    /// Raw error detail (development only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, detail: Option<String>, expose_detail: bool) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: detail.filter(|_| expose_detail),
        }
    }
}

/// Whether raw error text may be sent to clients. Read once from `APP_ENV`.
pub fn expose_error_details() -> bool {
    static EXPOSE: OnceLock<bool> = OnceLock::new();
    *EXPOSE.get_or_init(|| Environment::from_env().is_development())
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain errors convert into this with `From` so handlers can use `?`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// A delete blocked by a remaining reference. Rendered as 400.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Document store error: {0}")]
    DocumentStore(String),

    #[error("Image store error: {0}")]
    ImageStore(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Status, code, public message and optional raw detail.
    fn parts(self) -> (StatusCode, ErrorCode, String, Option<String>) {
        match self {
            AppError::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseError,
                ErrorCode::DatabaseError.default_message().to_string(),
                Some(e.to_string()),
            ),
            AppError::JsonExtractorRejection(e) => (
                e.status(),
                ErrorCode::JsonExtraction,
                ErrorCode::JsonExtraction.default_message().to_string(),
                Some(e.body_text()),
            ),
            AppError::Multipart(e) => (
                e.status(),
                ErrorCode::MultipartExtraction,
                ErrorCode::MultipartExtraction.default_message().to_string(),
                Some(e.body_text()),
            ),
            AppError::ValidationError(e) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message().to_string(),
                Some(describe_validation(&e)),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
                msg,
                None,
            ),
            AppError::InvalidId(raw) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidId,
                ErrorCode::InvalidId.default_message().to_string(),
                Some(format!("'{}' is not a valid id", raw)),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg, None),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, ErrorCode::Conflict, msg, None),
            AppError::DocumentStore(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DocumentStoreError,
                ErrorCode::DocumentStoreError.default_message().to_string(),
                Some(detail),
            ),
            AppError::ImageStore(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::ImageStoreError,
                ErrorCode::ImageStoreError.default_message().to_string(),
                Some(detail),
            ),
            AppError::InternalServerError(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                ErrorCode::InternalError.default_message().to_string(),
                Some(detail),
            ),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                msg,
                None,
            ),
        }
    }

    /// Render with explicit control over detail exposure.
    pub fn into_response_with(self, expose_detail: bool) -> Response {
        let (status, code, message, detail) = self.parts();

        if status.is_server_error() {
            tracing::error!(
                error_code = code.code(),
                error = code.as_str(),
                detail = detail.as_deref().unwrap_or_default(),
                "{}",
                message
            );
        } else {
            tracing::warn!(
                error_code = code.code(),
                error = code.as_str(),
                detail = detail.as_deref().unwrap_or_default(),
                "{}",
                message
            );
        }

        (status, Json(ErrorResponse::new(message, detail, expose_detail))).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(expose_error_details())
    }
}

/// `field: message; field: message` in field order.
fn describe_validation(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{}: {}", field, reasons.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
