use sqlx::Error as SqlxError;
use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SetupError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Could not connect to MySQL server: {0}")]
    Connection(#[source] SqlxError),

    #[error("Could not create database '{name}': {source}")]
    CreateDatabase {
        name: String,
        #[source]
        source: SqlxError,
    },

    #[error("Could not select database '{name}': {source}")]
    SelectDatabase {
        name: String,
        #[source]
        source: SqlxError,
    },

    #[error("Database SQL file not found: {}", path.display())]
    SchemaFileMissing { path: PathBuf },

    #[error("Could not read database SQL file {}: {source}", path.display())]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Statement #{index} failed: {source} (statement: {statement})")]
    Statement {
        index: usize,
        statement: String,
        #[source]
        source: SqlxError,
    },

    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Database connection test failed: {0}")]
    Verification(#[source] SqlxError),
}

impl SetupError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| SetupError::Filesystem { path, source }
    }
}

impl From<figment::Error> for SetupError {
    fn from(e: figment::Error) -> Self {
        SetupError::Config(Box::new(e))
    }
}

/// Things worth checking when any step of the setup fails.
pub const TROUBLESHOOTING: [&str; 4] = [
    "MySQL server is running",
    "Database credentials are correct",
    "Database user has CREATE privileges",
    "File permissions allow writing",
];
