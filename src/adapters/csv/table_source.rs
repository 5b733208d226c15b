//! CSV Table Source - Reads a decision table from CSV text.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::domain::topsis::TabularData;
use crate::ports::{TableSource, TableSourceError};

#[derive(Debug, Clone)]
enum Origin {
    File(PathBuf),
    Inline(String),
}

/// CSV-backed table source.
///
/// The first record is the header row. Records may have a different number
/// of fields than the header; column-count problems are reported when the
/// decision table is built, not here.
///
/// # Usage
///
/// ```rust,ignore
/// let source = CsvTableSource::from_path("data.csv");
/// let raw = source.load().await?;
/// let table = DecisionTable::from_tabular(&raw)?;
/// ```
#[derive(Debug, Clone)]
pub struct CsvTableSource {
    origin: Origin,
}

impl CsvTableSource {
    /// Reads from a file on disk when loaded.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: Origin::File(path.into()),
        }
    }

    /// Reads from CSV text already in memory.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::Inline(text.into()),
        }
    }

    /// Parses CSV bytes into headers and rows.
    pub fn parse(bytes: &[u8]) -> Result<TabularData, TableSourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| TableSourceError::malformed(format!("reading header row: {}", e)))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                TableSourceError::malformed(format!("reading row {}: {}", index + 1, e))
            })?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        Ok(TabularData { headers, rows })
    }
}

#[async_trait]
impl TableSource for CsvTableSource {
    async fn load(&self) -> Result<TabularData, TableSourceError> {
        let data = match &self.origin {
            Origin::File(path) => {
                let bytes = fs::read(path).await.map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => {
                        TableSourceError::not_found(path.display().to_string())
                    }
                    _ => TableSourceError::io(format!("reading {}: {}", path.display(), e)),
                })?;
                Self::parse(&bytes)?
            }
            Origin::Inline(text) => Self::parse(text.as_bytes())?,
        };

        tracing::debug!(
            source = %self.describe(),
            columns = data.column_count(),
            rows = data.row_count(),
            "Loaded CSV table"
        );
        Ok(data)
    }

    fn describe(&self) -> String {
        match &self.origin {
            Origin::File(path) => path.display().to_string(),
            Origin::Inline(_) => "<inline csv>".to_string(),
        }
    }
}
