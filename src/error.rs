//! Error types for the realtime voice demo

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Client configuration errors
///
/// Both variants are fatal at startup: the process must not continue
/// without an authenticated conversation client.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "endpoint {endpoint} configured without an auth method; \
         set AZURE_OPENAI_USE_ENTRA=true or AZURE_OPENAI_API_KEY"
    )]
    MissingAuthMethod { endpoint: String },

    #[error(
        "no client configuration present; provide one of:\n\
         - AZURE_OPENAI_ENDPOINT with AZURE_OPENAI_USE_ENTRA=true\n\
         - AZURE_OPENAI_ENDPOINT with AZURE_OPENAI_API_KEY\n\
         - OPENAI_API_KEY"
    )]
    NoConfigurationFound,
}

/// Audio subsystem errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to open stream: {0}")]
    StreamError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;
