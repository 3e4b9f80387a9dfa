//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use domain_catalog::{CatalogService, PgCatalogRepository};
use domain_customers::{CustomerService, PgCustomerRepository};
use domain_orders::{OrderService, PgOrderRepository};
use domain_warehouses::{PgWarehouseRepository, WarehouseService};

use crate::state::AppState;

/// Create all API routes; the caller nests them under `/api`
pub fn routes(state: &AppState) -> Router {
    let db = &state.db;

    Router::new()
        .merge(products::router(state))
        .merge(domain_catalog::handlers::router(CatalogService::new(
            PgCatalogRepository::new(db.clone()),
        )))
        .merge(domain_customers::handlers::router(CustomerService::new(
            PgCustomerRepository::new(db.clone()),
        )))
        .merge(domain_orders::handlers::router(OrderService::new(
            PgOrderRepository::new(db.clone()),
        )))
        .merge(domain_warehouses::handlers::router(WarehouseService::new(
            PgWarehouseRepository::new(db.clone()),
        )))
        .merge(health::router(state.clone()))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}
