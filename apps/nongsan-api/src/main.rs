//! Nông Sản back-office API - REST server over PostgreSQL, MongoDB and Cloudinary

use axum_helpers::server::{CleanupCoordinator, create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    // Either store failing here ends the process
    let db = database::postgres::connect_from_config(config.postgres.clone()).await?;
    if config.run_migrations {
        database::postgres::run_migrations::<migration::Migrator>(&db, env!("CARGO_PKG_NAME"))
            .await?;
    }

    let mongo_client = database::mongodb::connect_from_config(&config.mongodb).await?;
    let mongo = mongo_client.database(config.mongodb.database());
    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    if !config.cloudinary.is_configured() {
        tracing::warn!("Cloudinary credentials missing; product image uploads will fail");
    }

    let state = AppState {
        config: config.clone(),
        db,
        mongo_client,
        mongo,
    };

    api::init_indexes(&state).await?;

    let router = create_router::<openapi::ApiDoc>(api::routes(&state)).await?;

    // Relational pool first, then the document client
    let mut cleanup = CleanupCoordinator::new();
    cleanup.add_task("postgres", database::postgres::close(state.db.clone()));
    cleanup.add_task("mongodb", database::mongodb::close(state.mongo_client.clone()));

    info!("Starting back-office API on port {}", config.server.port);

    create_production_app(router, &config.server, cleanup.run())
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Back-office API shutdown complete");
    Ok(())
}
