//! Catalog Domain
//!
//! Reference data the product and order domains point at: categories,
//! suppliers and branches. Categories and suppliers are soft-deleted, and only
//! once no active product references them.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{CatalogService, InMemoryCatalogRepository, handlers};
//!
//! let service = CatalogService::new(InMemoryCatalogRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{
    Branch, Category, CategoryCreated, CategoryInput, Supplier, SupplierCreated, SupplierInput,
};
pub use postgres::PgCatalogRepository;
pub use repository::{CatalogRepository, InMemoryCatalogRepository};
pub use service::CatalogService;
