use std::path::PathBuf;

use thiserror::Error;

/// Top-level error of the registry server.
///
/// `NotFound` and `Conflict` carry the client-facing message; every other
/// variant surfaces as an internal server error.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    #[error("Store error: {0}")]
    Store(#[from] swiftcodes_store_db::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Server startup failed: {reason}")]
    Startup { reason: String },

    #[error("Database {} is not available", .path.display())]
    DatabaseUnavailable { path: PathBuf },

    #[error("Failed to encode metrics: {reason}")]
    Metrics { reason: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Extension trait for adding context to IO errors
pub trait IoErrorContext<T> {
    fn io_context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> IoErrorContext<T> for std::result::Result<T, std::io::Error> {
    fn io_context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|source| RegistryError::Io {
            context: context.into(),
            source,
        })
    }
}
