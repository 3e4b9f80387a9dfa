//! Products Domain
//!
//! A product lives in three stores: the Postgres row (existence, prices, stock),
//! a MongoDB detail document (description, attributes, reviews, image URLs) and
//! the Cloudinary assets those URLs point at.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, multipart form
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Create / update / delete steps across the stores
//! └──────┬──────┘
//!        │
//! ┌──────▼──────────────────────────────────┐
//! │ ProductRepository │ DetailRepository │ ImageStore │
//! │   (Postgres)      │   (MongoDB)      │ (Cloudinary) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     CloudinaryImageStore, MongoDetailRepository, PgProductRepository, ProductService,
//!     handlers,
//! };
//! use core_config::cloudinary::CloudinaryConfig;
//!
//! # async fn example(
//! #     db: sea_orm::DatabaseConnection,
//! #     mongo: mongodb::Database,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let service = ProductService::new(
//!     PgProductRepository::new(db),
//!     MongoDetailRepository::new(&mongo),
//!     CloudinaryImageStore::new(CloudinaryConfig::new("demo", "key", "secret")),
//! );
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod cloudinary;
pub mod entity;
pub mod error;
pub mod form;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod sort;

// Re-export commonly used types
pub use cloudinary::{CloudinaryImageStore, UploadOptions, public_id_from_url};
pub use error::{ProductError, ProductResult};
pub use form::ProductForm;
pub use handlers::ApiDoc;
pub use models::{
    CleanupReport, CreatedProduct, ImageUpload, Product, ProductDetail, ProductInput,
    ProductView, Statistics, StoredImage, UpdatedProduct,
};
pub use mongodb::MongoDetailRepository;
pub use postgres::PgProductRepository;
pub use repository::{
    DetailRepository, ImageStore, InMemoryDetailRepository, InMemoryImageStore,
    InMemoryProductRepository, ProductRepository,
};
pub use service::ProductService;
pub use sort::ProductSort;
