#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first, env_parse_or};

/// MongoDB client configuration.
#[derive(Clone, Debug)]
pub struct MongoConfig {
    pub url: String,
    pub database: String,
    pub app_name: Option<String>,
    pub max_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "nongsan".to_string(),
            app_name: None,
            max_pool_size: 10,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 10,
        }
    }
}

#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    /// - `MONGODB_URL` / `MONGO_URL` / `MONGODB_URI` (default `mongodb://localhost:27017`)
    /// - `MONGODB_DATABASE` / `MONGO_DATABASE` (default `nongsan`)
    /// - `MONGODB_APP_NAME`, `MONGODB_MAX_POOL_SIZE`
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let url = env_first(&["MONGODB_URL", "MONGO_URL", "MONGODB_URI"]).unwrap_or(defaults.url);
        let database =
            env_first(&["MONGODB_DATABASE", "MONGO_DATABASE"]).unwrap_or(defaults.database);

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            connect_timeout_secs: defaults.connect_timeout_secs,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}
