use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use futures::future::join_all;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;

/// A boxed health probe. `Ok` carries the label reported for the dependency
/// (`"Connected"`, `"Configured"`), `Err` the failure text.
pub type HealthCheckFuture<'a> =
    Pin<Box<dyn Future<Output = Result<&'static str, String>> + Send + 'a>>;

/// Runs all probes concurrently.
///
/// Healthy: `200 {success: true, status: "Healthy", databases: {...}, timestamp}`.
/// Any failure: `500 {success: false, status: "Unhealthy", error, databases: {...}}`.
pub async fn run_health_checks(checks: Vec<(&str, HealthCheckFuture<'_>)>) -> Response {
    let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();
    let results = join_all(checks.into_iter().map(|(_, check)| check)).await;

    let mut databases = Map::new();
    let mut failures = Vec::new();

    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(label) => {
                databases.insert(name.to_string(), json!(label));
            }
            Err(e) => {
                tracing::error!(dependency = name, error = %e, "Health check failed");
                databases.insert(name.to_string(), json!("Disconnected"));
                failures.push(format!("{}: {}", name, e));
            }
        }
    }

    let timestamp = Utc::now().to_rfc3339();

    if failures.is_empty() {
        let body = json!({
            "success": true,
            "status": "Healthy",
            "databases": Value::Object(databases),
            "timestamp": timestamp,
        });
        (StatusCode::OK, Json(body)).into_response()
    } else {
        let body = json!({
            "success": false,
            "status": "Unhealthy",
            "error": failures.join("; "),
            "databases": Value::Object(databases),
            "timestamp": timestamp,
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
