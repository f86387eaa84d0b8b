use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sparrow_db::config::{self, DbConfig};
use sparrow_db::error::InitError;
use sparrow_db::init::{self, ExecutionMode};

#[tokio::main]
async fn main() -> ExitCode {
    config::load_env_file(Path::new(".env"));

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!("database initialization");

    let config = match DbConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        user = %config.user,
        password = if config.password.is_empty() { "(empty)" } else { "***" },
        database = %config.database
    );

    if let Err(e) = init::run(ExecutionMode::Server, &config).await {
        report_failure(&e);
        return ExitCode::FAILURE;
    }

    #[cfg(feature = "mysql")]
    report_tables(&config).await;

    info!("database initialization complete");
    ExitCode::SUCCESS
}

/// Post-run verification listing. The schema is already applied at this
/// point, so a failure here is reported but never fails the run.
#[cfg(feature = "mysql")]
async fn report_tables(config: &DbConfig) {
    match sparrow_db::db::list_tables(config).await {
        Ok(tables) => {
            info!(database = %config.database, count = tables.len(), "tables present");
            for table in &tables {
                info!(table = %table);
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not list tables; the schema was still applied");
        }
    }
}

fn report_failure(e: &InitError) {
    error!(error = %e, "database initialization failed");
    match e {
        InitError::DriverUnavailable => {
            info!("rebuild with MySQL support: cargo build --features mysql");
            info!("or run the front-end normally; it uses browser local storage");
        }
        #[cfg(feature = "mysql")]
        InitError::Connection(_) => {
            info!("troubleshooting:");
            info!("  1. check that the MySQL service is running");
            info!("  2. verify the database credentials");
            info!("  3. ensure the user has CREATE DATABASE privileges");
            info!("  4. check the connection settings in the .env file");
        }
        #[cfg(feature = "mysql")]
        InitError::Execution(_) => {
            info!("the server rejected the schema; check schema.sql for errors");
        }
        _ => {}
    }
}

#[cfg(all(test, feature = "mysql"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listing_failure_after_a_successful_run_is_not_fatal() {
        let config = DbConfig {
            host: "127.0.0.1".to_string(),
            port: 9,
            user: "root".to_string(),
            password: String::new(),
            database: "survey_sparrow".to_string(),
        };
        // Must return normally; a failed listing is reported, not escalated.
        report_tables(&config).await;
    }
}
