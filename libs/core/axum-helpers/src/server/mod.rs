//! Server infrastructure module.
//!
//! - Router assembly with OpenAPI documentation
//! - Store health aggregation
//! - Graceful shutdown with drain timeout and sequential cleanup
//!
//! ```ignore
//! let router = create_router::<ApiDoc>(api_routes).await?;
//!
//! let mut cleanup = CleanupCoordinator::new();
//! cleanup.add_task("postgres", database::postgres::close(db));
//! cleanup.add_task("mongodb", database::mongodb::close(client));
//!
//! create_production_app(router, &config.server, cleanup.run()).await?;
//! ```

pub mod app;
pub mod cleanup;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use cleanup::CleanupCoordinator;
pub use health::{HealthCheckFuture, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
