use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_flag, env_or_default, env_parse_or};

/// PostgreSQL connection pool configuration.
///
/// The pool is deliberately small: requests beyond `max_connections` queue for
/// at most `acquire_timeout_secs`.
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Builds a URL from discrete parts, percent-encoding nothing: callers pass
    /// credentials that are already URL safe.
    pub fn from_parts(host: &str, port: u16, user: &str, password: &str, database: &str) -> Self {
        Self::new(format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, host, port, database
        ))
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }

    /// URL with the password masked, for logs.
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme), Some(at)) if at > scheme => {
                let creds = &self.url[scheme + 3..at];
                let user = creds.split(':').next().unwrap_or_default();
                format!("{}{}:***{}", &self.url[..scheme + 3], user, &self.url[at..])
            }
            _ => self.url.clone(),
        }
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 30,
            sqlx_logging: true,
        }
    }
}

#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    /// `DATABASE_URL` wins; otherwise the URL is assembled from `DB_HOST`, `DB_PORT`,
    /// `DB_USER`, `DB_PASSWORD` and `DB_NAME`.
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("DATABASE_URL").ok() {
            Some(url) => Self::new(url),
            None => Self::from_parts(
                &env_or_default("DB_HOST", "localhost"),
                env_parse_or("DB_PORT", 5432u16)?,
                &env_or_default("DB_USER", "postgres"),
                &env_or_default("DB_PASSWORD", "postgres"),
                &env_or_default("DB_NAME", "nongsan"),
            ),
        };

        config.max_connections = env_parse_or("DB_MAX_CONNECTIONS", config.max_connections)?;
        config.min_connections = env_parse_or("DB_MIN_CONNECTIONS", config.min_connections)?;
        config.connect_timeout_secs =
            env_parse_or("DB_CONNECT_TIMEOUT_SECS", config.connect_timeout_secs)?;
        config.acquire_timeout_secs =
            env_parse_or("DB_ACQUIRE_TIMEOUT_SECS", config.acquire_timeout_secs)?;
        config.sqlx_logging = env_flag("DB_SQLX_LOGGING", config.sqlx_logging);

        Ok(config)
    }
}
