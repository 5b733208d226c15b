//! Delivery Channel Port - Sending a result file to a recipient.
//!
//! Delivery happens after the result has been written and never affects it:
//! a failed delivery is reported on its own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::foundation::{DeliveryId, EmailAddress, Timestamp};

/// Default subject line of a result delivery.
pub const DEFAULT_SUBJECT: &str = "TOPSIS Result File";
/// Default body text of a result delivery.
pub const DEFAULT_BODY: &str = "Attached is your TOPSIS result file.";
/// Default file name of the attached result.
pub const DEFAULT_ATTACHMENT_NAME: &str = "result.csv";

/// Subject, body and attachment name used for result deliveries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryTemplate {
    pub subject: String,
    pub body: String,
    pub attachment_name: String,
}

impl Default for DeliveryTemplate {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            body: DEFAULT_BODY.to_string(),
            attachment_name: DEFAULT_ATTACHMENT_NAME.to_string(),
        }
    }
}

/// Port for delivering a result file.
///
/// # Contract
///
/// Implementations must:
/// - Assign every accepted message a fresh `DeliveryId`
/// - Return `DeliveryError::Rejected` when the message is refused outright,
///   and `DeliveryError::Io` when it could not be handed over
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn deliver(&self, message: DeliveryMessage) -> Result<DeliveryReceipt, DeliveryError>;
}

/// A file attached to a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// A message carrying one result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryMessage {
    pub recipient: EmailAddress,
    pub subject: String,
    pub body: String,
    pub attachment: Attachment,
}

impl DeliveryMessage {
    /// Creates a message with the default subject, body and attachment name.
    pub fn result_file(recipient: EmailAddress, content: Vec<u8>) -> Self {
        Self {
            recipient,
            subject: DEFAULT_SUBJECT.to_string(),
            body: DEFAULT_BODY.to_string(),
            attachment: Attachment {
                file_name: DEFAULT_ATTACHMENT_NAME.to_string(),
                content,
            },
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_attachment_name(mut self, file_name: impl Into<String>) -> Self {
        self.attachment.file_name = file_name.into();
        self
    }
}

/// Confirmation of an accepted delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub delivery_id: DeliveryId,
    pub recipient: EmailAddress,
    pub accepted_at: Timestamp,

    /// Where the channel left the message, if it is stored locally.
    pub location: Option<PathBuf>,
}

/// Errors that can occur while delivering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The message could not be handed over.
    #[error("Delivery IO error: {message}")]
    Io { message: String },

    /// The channel refused the message.
    #[error("Delivery rejected: {reason}")]
    Rejected { reason: String },
}

impl DeliveryError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for DeliveryError {
    fn from(err: std::io::Error) -> Self {
        DeliveryError::io(err.to_string())
    }
}
