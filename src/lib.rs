pub mod config;
#[cfg(feature = "mysql")]
pub mod db;
pub mod error;
pub mod init;
pub mod schema;

pub use config::DbConfig;
pub use error::InitError;
pub use init::{ExecutionMode, check_connection, run};
