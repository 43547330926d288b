use error_stack::{Report, ResultExt};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV_VAR: &str = "CATEGORIES_LOG";

#[derive(Debug, thiserror::Error)]
#[error("failed to initialize logging")]
pub struct LoggingInitError;

/// Installs a `fmt` subscriber filtered by the `CATEGORIES_LOG` env var.
pub fn init() -> Result<(), Report<LoggingInitError>> {
    init_from_env(LOG_ENV_VAR)
}

pub fn init_from_env(env_var: &str) -> Result<(), Report<LoggingInitError>> {
    error_stack::Report::set_color_mode(error_stack::fmt::ColorMode::None);

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env(env_var))
        .try_init()
        .change_context(LoggingInitError)
        .attach_with(|| format!("log filter read from {env_var}"))?;

    debug!(env_var, "logging initialized");
    Ok(())
}

/// Test-friendly variant: writes through the test harness and ignores
/// a subscriber that is already installed.
pub fn init_for_tests() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_env(LOG_ENV_VAR))
        .try_init();
}
