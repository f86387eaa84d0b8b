use std::env;
use std::path::Path;

use tracing::debug;

use crate::error::InitError;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_DATABASE: &str = "survey_sparrow";

/// Connection parameters for the MySQL server, resolved once at startup and
/// passed explicitly to the initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

impl DbConfig {
    /// Resolve the configuration from the `DB_HOST`, `DB_PORT`, `DB_USER`,
    /// `DB_PASSWORD` and `DB_NAME` environment variables. A variable that is
    /// unset or empty falls back to its default.
    pub fn from_env() -> Result<Self, InitError> {
        let port = match non_empty("DB_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                InitError::Config(format!("DB_PORT is not a valid port number: {raw:?}"))
            })?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            host: non_empty("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            user: non_empty("DB_USER").unwrap_or_else(|| DEFAULT_USER.to_string()),
            password: non_empty("DB_PASSWORD").unwrap_or_default(),
            database: non_empty("DB_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        })
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// Inject `KEY=VALUE` pairs from a local env file into the process
/// environment. Malformed lines are skipped; well-formed ones overwrite any
/// existing variable. A missing or unreadable file is a no-op.
pub fn load_env_file(path: &Path) {
    let Ok(entries) = dotenvy::from_path_iter(path) else {
        return;
    };
    for (key, value) in entries.flatten() {
        debug!(%key, "applying variable from env file");
        // SAFETY: called during startup, before any thread reads the
        // environment concurrently.
        unsafe { env::set_var(&key, &value) };
    }
}
