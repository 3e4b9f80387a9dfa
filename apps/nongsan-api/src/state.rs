//! Application state management

use mongodb::{Client, Database};
use sea_orm::DatabaseConnection;

/// Store handles shared by every router.
///
/// Built once in `main` after both stores answered; services get clones.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
    pub mongo_client: Client,
    pub mongo: Database,
}
