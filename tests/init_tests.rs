use std::path::{Path, PathBuf};

use sparrow_db::config::DbConfig;
use sparrow_db::init::{self, ExecutionMode};

// Port 9 (discard) is assumed closed; connecting to it must fail fast
// without ever reaching a MySQL server.
fn unreachable_config() -> DbConfig {
    DbConfig {
        host: "127.0.0.1".to_string(),
        port: 9,
        user: "root".to_string(),
        password: String::new(),
        database: "survey_sparrow".to_string(),
    }
}

fn write_schema(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("schema.sql");
    std::fs::write(
        &path,
        "CREATE DATABASE IF NOT EXISTS app;\nUSE app;\nCREATE TABLE t (id INT);\n",
    )
    .unwrap();
    path
}

#[tokio::test]
async fn browser_mode_succeeds_without_a_database() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(&dir);

    // The host is unreachable; browser mode must not care.
    let result = init::run_from(ExecutionMode::Browser, &unreachable_config(), &schema).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn browser_mode_runs_against_the_bundled_schema() {
    // run() loads schema.sql from the package root, which is the working
    // directory for cargo test.
    let result = sparrow_db::run(ExecutionMode::Browser, &unreachable_config()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn browser_mode_still_requires_the_schema_file() {
    let result = init::run_from(
        ExecutionMode::Browser,
        &unreachable_config(),
        Path::new("/nonexistent/schema.sql"),
    )
    .await;
    assert!(matches!(
        result,
        Err(sparrow_db::InitError::SchemaNotFound { .. })
    ));
}

#[tokio::test]
async fn missing_schema_fails_before_any_connection_attempt() {
    // An unreachable host would surface a connection error if the initializer
    // connected first; a schema error proves load-then-connect ordering.
    let result = init::run_from(
        ExecutionMode::Server,
        &unreachable_config(),
        Path::new("/nonexistent/schema.sql"),
    )
    .await;
    assert!(matches!(
        result,
        Err(sparrow_db::InitError::SchemaNotFound { .. })
    ));
}

#[cfg(feature = "mysql")]
#[tokio::test]
async fn unreachable_host_surfaces_a_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(&dir);

    let result = init::run_from(ExecutionMode::Server, &unreachable_config(), &schema).await;
    assert!(matches!(
        result,
        Err(sparrow_db::InitError::Connection(_))
    ));
}

#[tokio::test]
async fn browser_connection_check_is_always_healthy() {
    assert!(init::check_connection(ExecutionMode::Browser, &unreachable_config()).await);
}

#[cfg(feature = "mysql")]
#[tokio::test]
async fn server_connection_check_fails_for_unreachable_host() {
    assert!(!init::check_connection(ExecutionMode::Server, &unreachable_config()).await);
}
