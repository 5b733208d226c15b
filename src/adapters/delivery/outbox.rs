//! Outbox Delivery Channel - Drops each message as a JSON envelope on disk.
//!
//! An external mailer watches the outbox directory and sends whatever it
//! finds. This crate never speaks SMTP itself.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::foundation::{DeliveryId, EmailAddress, Timestamp};
use crate::ports::{DeliveryChannel, DeliveryError, DeliveryMessage, DeliveryReceipt};

/// On-disk form of one queued message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxEnvelope {
    pub delivery_id: DeliveryId,
    pub from: Option<EmailAddress>,
    pub to: EmailAddress,
    pub subject: String,
    pub body: String,
    pub attachment: OutboxAttachment,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxAttachment {
    pub file_name: String,
    pub content_type: String,
    pub content: String,
}

/// Writes `{outbox_dir}/{delivery_id}.json` per message.
///
/// Envelopes are written to `{delivery_id}.json.tmp` first and renamed, so a
/// watcher never sees a half-written file.
#[derive(Debug, Clone)]
pub struct OutboxDeliveryChannel {
    outbox_dir: PathBuf,
    from: Option<EmailAddress>,
}

impl OutboxDeliveryChannel {
    pub fn new(outbox_dir: impl Into<PathBuf>) -> Self {
        Self {
            outbox_dir: outbox_dir.into(),
            from: None,
        }
    }

    /// Sets the sender address written into every envelope.
    pub fn with_sender(mut self, from: EmailAddress) -> Self {
        self.from = Some(from);
        self
    }

    pub fn outbox_dir(&self) -> &Path {
        &self.outbox_dir
    }

    fn envelope_path(&self, delivery_id: DeliveryId) -> PathBuf {
        self.outbox_dir.join(format!("{}.json", delivery_id))
    }

    fn temp_path(&self, delivery_id: DeliveryId) -> PathBuf {
        self.outbox_dir.join(format!("{}.json.tmp", delivery_id))
    }

    fn envelope(
        &self,
        delivery_id: DeliveryId,
        message: DeliveryMessage,
    ) -> Result<OutboxEnvelope, DeliveryError> {
        let content = String::from_utf8(message.attachment.content).map_err(|_| {
            DeliveryError::rejected(format!(
                "attachment {} is not valid UTF-8 text",
                message.attachment.file_name
            ))
        })?;

        Ok(OutboxEnvelope {
            delivery_id,
            from: self.from.clone(),
            to: message.recipient,
            subject: message.subject,
            body: message.body,
            attachment: OutboxAttachment {
                file_name: message.attachment.file_name,
                content_type: "text/csv".to_string(),
                content,
            },
            created_at: Timestamp::now(),
        })
    }

    async fn write_atomically(
        &self,
        delivery_id: DeliveryId,
        json: &[u8],
    ) -> Result<(), DeliveryError> {
        let temp_path = self.temp_path(delivery_id);
        let final_path = self.envelope_path(delivery_id);

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(json).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            DeliveryError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }

    async fn write_envelope(&self, envelope: &OutboxEnvelope) -> Result<PathBuf, DeliveryError> {
        let json = serde_json::to_vec_pretty(envelope)
            .map_err(|e| DeliveryError::io(format!("Failed to encode envelope: {}", e)))?;

        fs::create_dir_all(&self.outbox_dir).await.map_err(|e| {
            DeliveryError::io(format!(
                "Failed to create outbox {}: {}",
                self.outbox_dir.display(),
                e
            ))
        })?;

        let final_path = self.envelope_path(envelope.delivery_id);
        if let Err(err) = self.write_atomically(envelope.delivery_id, &json).await {
            // best effort; the temp file may not exist
            let _ = fs::remove_file(self.temp_path(envelope.delivery_id)).await;
            return Err(err);
        }

        Ok(final_path)
    }
}

#[async_trait]
impl DeliveryChannel for OutboxDeliveryChannel {
    async fn deliver(&self, message: DeliveryMessage) -> Result<DeliveryReceipt, DeliveryError> {
        let delivery_id = DeliveryId::new();
        let envelope = self.envelope(delivery_id, message)?;
        let path = self.write_envelope(&envelope).await?;

        tracing::info!(
            delivery_id = %delivery_id,
            recipient = %envelope.to,
            path = %path.display(),
            "Queued result delivery"
        );

        Ok(DeliveryReceipt {
            delivery_id,
            recipient: envelope.to,
            accepted_at: envelope.created_at,
            location: Some(path),
        })
    }
}
