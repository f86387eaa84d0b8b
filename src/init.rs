use std::path::Path;

use tracing::info;

use crate::config::DbConfig;
use crate::error::InitError;
use crate::schema;

/// Where the process is running, decided once at the application entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Packaged front-end; the browser's local store is the persistence layer.
    Browser,
    /// Headless process with network access to the database server.
    Server,
}

/// Ensure the backing schema exists.
///
/// Loads the schema file, then either returns without touching the network
/// (browser) or applies the schema over a single short-lived connection
/// (server). Intended to run once at startup; the DDL itself is idempotent.
pub async fn run(mode: ExecutionMode, config: &DbConfig) -> Result<(), InitError> {
    info!("initializing database");
    let schema_text = schema::load().await?;
    dispatch(mode, config, &schema_text).await
}

/// Same as [`run`], with an explicit schema path.
pub async fn run_from(
    mode: ExecutionMode,
    config: &DbConfig,
    schema_path: &Path,
) -> Result<(), InitError> {
    info!("initializing database");
    let schema_text = schema::load_from(schema_path).await?;
    dispatch(mode, config, &schema_text).await
}

// Loading always precedes dispatch: a missing schema must fail before any
// connection attempt.
async fn dispatch(
    mode: ExecutionMode,
    config: &DbConfig,
    schema_text: &str,
) -> Result<(), InitError> {
    match mode {
        ExecutionMode::Browser => {
            info!("browser mode: using local storage as the persistence layer");
            info!("the MySQL schema remains available for server-side deployment");
            Ok(())
        }
        ExecutionMode::Server => apply(config, schema_text).await,
    }
}

#[cfg(feature = "mysql")]
async fn apply(config: &DbConfig, schema_text: &str) -> Result<(), InitError> {
    crate::db::apply_schema(config, schema_text).await
}

#[cfg(not(feature = "mysql"))]
async fn apply(_config: &DbConfig, _schema_text: &str) -> Result<(), InitError> {
    Err(InitError::DriverUnavailable)
}

/// Report whether the configured database is reachable. Browser mode has no
/// database to reach and always reports healthy; server mode opens a probe
/// connection and pings it.
pub async fn check_connection(mode: ExecutionMode, config: &DbConfig) -> bool {
    match mode {
        ExecutionMode::Browser => true,
        ExecutionMode::Server => probe(config).await,
    }
}

#[cfg(feature = "mysql")]
async fn probe(config: &DbConfig) -> bool {
    match crate::db::ping(config).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "database connection check failed");
            false
        }
    }
}

#[cfg(not(feature = "mysql"))]
async fn probe(_config: &DbConfig) -> bool {
    tracing::warn!("database connection check skipped: MySQL driver not compiled in");
    false
}
