//! Connectors for the two stores behind the back office: PostgreSQL (SeaORM) for the
//! relational entities and MongoDB for the per-product detail documents.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `mongodb` (default) - MongoDB support
//! - `config` - `core_config::FromEnv` implementations for the config structs
//!
//! ```ignore
//! use database::{mongodb, postgres};
//!
//! let db = postgres::connect_from_config(PostgresConfig::from_env()?).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "nongsan-api").await?;
//!
//! let client = mongodb::connect_from_config(&MongoConfig::from_env()?).await?;
//! mongodb::check_health(&client).await?;
//! ```
//!
//! Connections are never retried: a store that is down at startup is a startup failure.

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
