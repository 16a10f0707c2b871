use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cannot read match log from {source_name}: {reason}")]
    UnreadableInput { source_name: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("JSON serialization error: {0}")]
    JsonError(String),
}
