//! Delivery channel adapters.

mod in_memory;
mod outbox;

pub use in_memory::InMemoryDeliveryChannel;
pub use outbox::{OutboxAttachment, OutboxDeliveryChannel, OutboxEnvelope};
