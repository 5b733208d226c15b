//! CSV adapters for the table source and result sink ports.

mod result_sink;
mod table_source;

pub use result_sink::CsvResultSink;
pub use table_source::CsvTableSource;
