use axum::{
    Json,
    extract::OriginalUri,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::messages;

#[derive(Serialize)]
struct RouteNotFound<'a> {
    success: bool,
    message: &'a str,
    path: String,
    method: String,
}

/// Router fallback: `404 {success: false, message, path, method}`.
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    tracing::debug!(%method, path = %uri.path(), "No route matched");

    let body = RouteNotFound {
        success: false,
        message: messages::NOT_FOUND_ROUTE,
        path: uri.path().to_string(),
        method: method.to_string(),
    };

    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
