//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `csv` - CSV table source and result sink
//! - `text` - Weights and impacts from comma-separated text
//! - `delivery` - File outbox and in-memory delivery channels

pub mod csv;
pub mod delivery;
pub mod text;

pub use self::csv::{CsvResultSink, CsvTableSource};
pub use delivery::{InMemoryDeliveryChannel, OutboxDeliveryChannel, OutboxEnvelope};
pub use text::CriteriaTextParser;
