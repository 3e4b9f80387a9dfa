//! Container-backed stores for domain integration tests
//!
//! - `TestDatabase`: PostgreSQL 17 with every migration applied and reference data seeded
//!   (feature: "postgres", default)
//! - `TestMongo`: MongoDB 7 for product detail documents (feature: "mongodb")
//!
//! Both need Docker; tests using them are marked `#[ignore = "requires Docker"]`
//! and run with `cargo test -- --ignored`.
//!
//! ```rust,no_run
//! use test_utils::TestDatabase;
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let supplier = db.create_supplier("HTX Rau sạch Đà Lạt").await;
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "mongodb")]
mod mongo;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

#[cfg(feature = "mongodb")]
pub use mongo::TestMongo;
