//! In-Memory Delivery Channel
//!
//! Records delivered messages instead of sending them.
//! Useful for testing and embedding.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DeliveryId, Timestamp};
use crate::ports::{DeliveryChannel, DeliveryError, DeliveryMessage, DeliveryReceipt};

#[derive(Debug, Clone, Default)]
pub struct InMemoryDeliveryChannel {
    delivered: Arc<RwLock<Vec<DeliveryMessage>>>,
    failure: Option<DeliveryError>,
}

impl InMemoryDeliveryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel that rejects every message with `error`.
    pub fn failing(error: DeliveryError) -> Self {
        Self {
            delivered: Arc::default(),
            failure: Some(error),
        }
    }

    /// Messages accepted so far, oldest first.
    pub async fn delivered(&self) -> Vec<DeliveryMessage> {
        self.delivered.read().await.clone()
    }

    pub async fn delivered_count(&self) -> usize {
        self.delivered.read().await.len()
    }
}

#[async_trait]
impl DeliveryChannel for InMemoryDeliveryChannel {
    async fn deliver(&self, message: DeliveryMessage) -> Result<DeliveryReceipt, DeliveryError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let receipt = DeliveryReceipt {
            delivery_id: DeliveryId::new(),
            recipient: message.recipient.clone(),
            accepted_at: Timestamp::now(),
            location: None,
        };
        self.delivered.write().await.push(message);
        Ok(receipt)
    }
}
