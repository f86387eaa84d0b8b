use std::io;
use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::error::InitError;

/// Location of the DDL file, relative to the application root.
pub const SCHEMA_PATH: &str = "schema.sql";

/// Read the bundled schema file into memory.
pub async fn load() -> Result<String, InitError> {
    load_from(Path::new(SCHEMA_PATH)).await
}

/// Read a schema file from an explicit path. The contents are opaque to the
/// initializer and handed to the server verbatim.
pub async fn load_from(path: &Path) -> Result<String, InitError> {
    match fs::read_to_string(path).await {
        Ok(text) => {
            info!(path = %path.display(), bytes = text.len(), "schema file loaded");
            Ok(text)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(InitError::SchemaNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(InitError::SchemaRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_schema_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.sql");
        let ddl = "CREATE DATABASE IF NOT EXISTS app;\nUSE app;\nCREATE TABLE t (id INT);\n";
        std::fs::write(&path, ddl).unwrap();

        let text = load_from(&path).await.unwrap();
        assert_eq!(text, ddl);
    }

    #[tokio::test]
    async fn loads_the_bundled_schema() {
        // cargo runs tests from the package root, where schema.sql lives.
        let text = load().await.unwrap();
        assert!(text.contains("CREATE DATABASE IF NOT EXISTS survey_sparrow"));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-schema.sql");

        let err = load_from(&path).await.unwrap_err();
        assert!(matches!(err, InitError::SchemaNotFound { .. }));
    }
}
