//! Error types for model_sync

use thiserror::Error;

/// Result type for model_sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for model_sync
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unable to access datasource {datasource}: {reason}")]
    DatasourceUnavailable { datasource: String, reason: String },

    #[error("Table {table} does not exist in database {database}")]
    TableNotFound { table: String, database: String },

    #[error("{0}.json does not exist, use the add command to add new models")]
    ModelFileNotFound(String),

    #[error("Could not read registry file {0}")]
    RegistryFileNotFound(String),

    #[error("Could not parse registry file {path}: {reason}")]
    RegistryParse { path: String, reason: String },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Convert Serde JSON errors to model_sync errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert TOML deserialization errors to model_sync errors
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}
