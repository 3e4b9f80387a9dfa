//! Warehouses Domain
//!
//! Warehouses belong to a branch and hold inventory records, one per product.
//! Deleting a warehouse removes its inventory records and clears its active
//! flag; inactive warehouses and their stock drop out of every listing.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{WarehouseError, WarehouseResult};
pub use handlers::ApiDoc;
pub use models::{
    InventoryItem, NewWarehouse, UpdateStock, UpdateWarehouse, Warehouse, WarehouseCreated,
};
pub use postgres::PgWarehouseRepository;
pub use repository::{InMemoryWarehouseRepository, WarehouseRepository};
pub use service::WarehouseService;
