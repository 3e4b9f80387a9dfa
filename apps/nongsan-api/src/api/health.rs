//! Store health endpoint

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

/// Postgres and MongoDB must answer; Cloudinary is only reported.
async fn health(State(state): State<AppState>) -> Response {
    let postgres: HealthCheckFuture<'_> = Box::pin(async {
        database::postgres::check_health(&state.db)
            .await
            .map(|_| "Connected")
            .map_err(|e| e.to_string())
    });
    let mongo: HealthCheckFuture<'_> = Box::pin(async {
        database::mongodb::check_health(&state.mongo_client)
            .await
            .map(|_| "Connected")
            .map_err(|e| e.to_string())
    });
    let cloudinary_label = if state.config.cloudinary.is_configured() {
        "Configured"
    } else {
        "Not configured"
    };
    let cloudinary: HealthCheckFuture<'_> = Box::pin(async move { Ok(cloudinary_label) });

    run_health_checks(vec![
        ("postgres", postgres),
        ("mongoDB", mongo),
        ("cloudinary", cloudinary),
    ])
    .await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state)
}
