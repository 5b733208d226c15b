//! CSV Result Sink - Writes the augmented table as a CSV file.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::topsis::TabularData;
use crate::ports::{ResultSink, SinkError, SinkReceipt};

/// Writes a result table to a single CSV file.
///
/// # Atomic Writes
///
/// 1. Encode the whole table in memory
/// 2. Write it to `{path}.tmp` and sync to disk
/// 3. Rename to `{path}`
///
/// An existing file at `path` is replaced only once the new content is
/// complete on disk.
#[derive(Debug, Clone)]
pub struct CsvResultSink {
    path: PathBuf,
}

impl CsvResultSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Encodes headers and rows as CSV, quoting cells where needed.
    pub fn encode(table: &TabularData) -> Result<Vec<u8>, SinkError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer
            .write_record(&table.headers)
            .map_err(|e| SinkError::encode(format!("header row: {}", e)))?;
        for (index, row) in table.rows.iter().enumerate() {
            writer
                .write_record(row)
                .map_err(|e| SinkError::encode(format!("row {}: {}", index + 1, e)))?;
        }

        writer
            .into_inner()
            .map_err(|e| SinkError::encode(e.to_string()))
    }

    async fn write_atomically(&self, content: &[u8]) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                SinkError::io(format!("Failed to create directory {}: {}", parent.display(), e))
            })?;
        }

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            SinkError::io(format!("Failed to create temp file {}: {}", temp_path.display(), e))
        })?;

        file.write_all(content).await.map_err(|e| {
            SinkError::io(format!("Failed to write temp file {}: {}", temp_path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            SinkError::io(format!("Failed to sync temp file {}: {}", temp_path.display(), e))
        })?;
        drop(file);

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            SinkError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl ResultSink for CsvResultSink {
    async fn write(&self, table: &TabularData) -> Result<SinkReceipt, SinkError> {
        let content = Self::encode(table)?;

        if let Err(err) = self.write_atomically(&content).await {
            // best effort; the temp file may not exist
            let _ = fs::remove_file(self.temp_path()).await;
            return Err(err);
        }

        tracing::debug!(
            path = %self.path.display(),
            rows = table.row_count(),
            bytes = content.len(),
            "Wrote CSV result"
        );
        Ok(SinkReceipt::new(self.path.clone(), table.row_count(), content))
    }
}
