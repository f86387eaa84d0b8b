//! MySQL collaborator: one short-lived connection per operation, never pooled
//! or reused across calls.

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection, Execute, Executor, MySql, Row};
use tracing::{info, warn};

use crate::config::DbConfig;
use crate::error::InitError;

fn connect_options(config: &DbConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
}

async fn connect(options: MySqlConnectOptions) -> Result<MySqlConnection, InitError> {
    options.connect().await.map_err(InitError::Connection)
}

async fn close(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        warn!(error = %e, "error while closing connection");
    }
}

/// The entire schema text forms one batched call, verbatim; statement
/// splitting is the server's job.
fn schema_batch(schema_text: &str) -> impl Execute<'_, MySql> {
    sqlx::raw_sql(schema_text)
}

/// Apply the schema text over a single short-lived connection.
///
/// The connection is opened without selecting a database so the schema itself
/// may create the target one. The whole text goes to the server as one
/// batched call; the connection is closed whether or not execution succeeds.
pub async fn apply_schema(config: &DbConfig, schema_text: &str) -> Result<(), InitError> {
    let mut conn = connect(connect_options(config)).await?;
    info!(host = %config.host, port = config.port, "connected to MySQL server");

    let outcome = conn.execute(schema_batch(schema_text)).await;
    close(conn).await;
    outcome.map_err(InitError::Execution)?;

    info!("schema executed successfully");
    Ok(())
}

/// Open a probe connection, ping it, and close it.
pub async fn ping(config: &DbConfig) -> Result<(), InitError> {
    let mut conn = connect(connect_options(config)).await?;
    let outcome = conn.ping().await;
    close(conn).await;
    outcome.map_err(InitError::Connection)
}

/// List the tables present in the configured database.
pub async fn list_tables(config: &DbConfig) -> Result<Vec<String>, InitError> {
    let mut conn = connect(connect_options(config).database(&config.database)).await?;
    let rows = sqlx::query("SHOW TABLES").fetch_all(&mut conn).await;
    close(conn).await;

    rows.map_err(InitError::Execution)?
        .into_iter()
        .map(|row| row.try_get::<String, _>(0).map_err(InitError::Execution))
        .collect()
}
