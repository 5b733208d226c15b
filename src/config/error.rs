//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("Log filter must not be empty")]
    EmptyLogLevel,

    #[error("Result column name must not be empty: {0}")]
    EmptyColumnName(&'static str),

    #[error("Score and rank columns must have different names")]
    DuplicateColumnNames,

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Outbox directory must be set when delivery is enabled")]
    MissingOutboxDir,

    #[error("Attachment name must not be empty")]
    EmptyAttachmentName,
}
