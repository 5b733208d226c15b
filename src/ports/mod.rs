//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TableSource` - Loads the raw decision table
//! - `ResultSink` - Persists the augmented result table
//! - `DeliveryChannel` - Sends the result file to a recipient

mod delivery_channel;
mod result_sink;
mod table_source;

pub use delivery_channel::{
    Attachment, DeliveryChannel, DeliveryError, DeliveryMessage, DeliveryReceipt,
    DeliveryTemplate, DEFAULT_ATTACHMENT_NAME, DEFAULT_BODY, DEFAULT_SUBJECT,
};
pub use result_sink::{ResultSink, SinkError, SinkReceipt};
pub use table_source::{TableSource, TableSourceError};
