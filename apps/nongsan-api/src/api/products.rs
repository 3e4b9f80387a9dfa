//! Products API routes

use axum::Router;
use domain_products::{
    CloudinaryImageStore, MongoDetailRepository, PgProductRepository, ProductService, handlers,
};

use crate::state::AppState;

/// Create products router over Postgres, MongoDB and Cloudinary
pub fn router(state: &AppState) -> Router {
    let service = ProductService::new(
        PgProductRepository::new(state.db.clone()),
        MongoDetailRepository::new(&state.mongo),
        CloudinaryImageStore::new(state.config.cloudinary.clone()),
    );
    handlers::router(service)
}

/// Initialize detail document indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoDetailRepository::new(&state.mongo)
        .init_indexes()
        .await?;
    Ok(())
}
