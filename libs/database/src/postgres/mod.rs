//! PostgreSQL connector, health probe and migration runner.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{close, connect, connect_from_config, run_migrations};
pub use health::check_health;

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
