use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum InitError {
    #[error("schema file not found: {}", path.display())]
    SchemaNotFound { path: PathBuf },

    #[error("failed to read schema file {}: {source}", path.display())]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid database configuration: {0}")]
    Config(String),

    #[cfg(feature = "mysql")]
    #[error("could not connect to the database server: {0}")]
    Connection(#[source] sqlx::Error),

    #[cfg(feature = "mysql")]
    #[error("schema execution rejected by the server: {0}")]
    Execution(#[source] sqlx::Error),

    #[error("MySQL driver support is not compiled in (enable the `mysql` feature)")]
    DriverUnavailable,
}
