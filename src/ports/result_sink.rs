//! Result Sink Port - Where the augmented table goes.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::topsis::TabularData;

/// Port for persisting the augmented result table.
///
/// # Contract
///
/// Implementations must:
/// - Write the headers and every row in order, cells verbatim
/// - Write atomically (a failed write leaves no partial file behind)
/// - Return the encoded bytes in the receipt so the result can be delivered
///   without reading it back
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn write(&self, table: &TabularData) -> Result<SinkReceipt, SinkError>;
}

/// Confirmation of a completed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkReceipt {
    /// Final location of the written table.
    pub path: PathBuf,

    /// Number of data rows written (excluding the header).
    pub rows: usize,

    /// The encoded table exactly as written.
    pub content: Vec<u8>,
}

impl SinkReceipt {
    pub fn new(path: impl Into<PathBuf>, rows: usize, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            rows,
            content,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Errors that can occur while writing a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// Permission denied writing the target.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// IO error during the write.
    #[error("IO error: {message}")]
    Io { message: String },

    /// The table could not be encoded.
    #[error("Encoding failed: {message}")]
    Encode { message: String },
}

impl SinkError {
    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => SinkError::permission_denied(err.to_string()),
            _ => SinkError::io(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_reports_size() {
        let receipt = SinkReceipt::new("out.csv", 2, b"a,b\n1,2\n3,4\n".to_vec());
        assert_eq!(receipt.size_bytes(), 12);
        assert_eq!(receipt.path, PathBuf::from("out.csv"));
    }

    #[test]
    fn from_io_error_maps_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: SinkError = io_err.into();
        assert!(matches!(err, SinkError::PermissionDenied { .. }));
    }

    #[test]
    fn encode_error_displays_message() {
        let err = SinkError::encode("bad record");
        assert_eq!(err.to_string(), "Encoding failed: bad record");
    }

    #[test]
    fn result_sink_is_object_safe() {
        fn check<T: ResultSink + ?Sized>() {}
        check::<dyn ResultSink>();
    }
}
