//! Table Source Port - Where the raw decision table comes from.
//!
//! The domain never reads files itself. A table source hands over the header
//! row and data rows as untyped text; `DecisionTable::from_tabular` does the
//! numeric validation.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::topsis::TabularData;

/// Port for loading a raw table.
///
/// # Contract
///
/// Implementations must:
/// - Return the first record as `headers` and every following record as a row
/// - Keep cell text as read (no numeric parsing, no column-count checks)
/// - Map a missing input to `TableSourceError::NotFound`
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Loads the whole table into memory.
    async fn load(&self) -> Result<TabularData, TableSourceError>;

    /// Human-readable origin of the table, for logs and error messages.
    fn describe(&self) -> String;
}

/// Errors that can occur while loading a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableSourceError {
    /// Input does not exist.
    #[error("Input file not found: {path}")]
    NotFound { path: String },

    /// IO error while reading.
    #[error("IO error: {message}")]
    Io { message: String },

    /// Content could not be decoded as a table.
    #[error("Malformed input: {message}")]
    Malformed { message: String },
}

impl TableSourceError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for TableSourceError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => TableSourceError::not_found(err.to_string()),
            _ => TableSourceError::io(err.to_string()),
        }
    }
}
