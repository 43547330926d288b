use error_stack::{Report, ResultExt};
use tracing::{debug, warn};

pub mod categories;
pub mod initializer;
mod statements;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DATABASE_POOL_SIZE_VAR: &str = "DATABASE_POOL_SIZE";

#[derive(Debug, Clone)]
pub enum ConnectionDetails {
    Url(String),
}

#[derive(Debug, thiserror::Error)]
#[error("failed to initialize postgres {0} repo")]
pub struct RepoInitErr(&'static str);

impl RepoInitErr {
    fn categories() -> Self {
        Self("categories")
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to run postgres migrations")]
pub struct RepoMigrationErr;

#[derive(Debug, thiserror::Error)]
#[error("invalid postgres configuration")]
pub struct ConfigError;

/// Connection settings read from the environment.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub connection: ConnectionDetails,
    pub pool_size: Option<usize>,
}

impl PostgresConfig {
    /// Loads `.env` when present, then reads `DATABASE_URL` (required) and
    /// `DATABASE_POOL_SIZE` (optional).
    pub fn from_env() -> Result<Self, Report<ConfigError>> {
        if let Err(e) = dotenv::dotenv() {
            warn!("failed to load .env file: {e}");
        }

        let url = std::env::var(DATABASE_URL_VAR)
            .change_context(ConfigError)
            .attach_with(|| format!("{DATABASE_URL_VAR} is missing"))?;

        let pool_size = match std::env::var(DATABASE_POOL_SIZE_VAR) {
            Ok(size) => Some(
                size.parse::<usize>()
                    .change_context(ConfigError)
                    .attach_with(|| {
                        format!("{DATABASE_POOL_SIZE_VAR} must be a positive number, got '{size}'")
                    })?,
            ),
            Err(_) => None,
        };

        debug!(?pool_size, "postgres configuration loaded");
        Ok(Self {
            connection: ConnectionDetails::Url(url),
            pool_size,
        })
    }
}
