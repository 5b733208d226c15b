//! Result delivery configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ConfigValidationError;
use crate::domain::foundation::EmailAddress;
use crate::ports::{DeliveryTemplate, DEFAULT_ATTACHMENT_NAME, DEFAULT_BODY, DEFAULT_SUBJECT};

/// Delivery configuration (file outbox picked up by an external mailer)
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    /// Whether result files may be delivered at all
    #[serde(default)]
    pub enabled: bool,

    /// Directory envelopes are written to
    #[serde(default = "default_outbox_dir")]
    pub outbox_dir: PathBuf,

    /// Sender address recorded in every envelope
    pub from_address: Option<String>,

    #[serde(default = "default_subject")]
    pub subject: String,

    #[serde(default = "default_body")]
    pub body: String,

    #[serde(default = "default_attachment_name")]
    pub attachment_name: String,
}

impl DeliveryConfig {
    /// Parsed sender address, if one is configured
    pub fn sender(&self) -> Result<Option<EmailAddress>, ConfigValidationError> {
        self.from_address
            .as_deref()
            .map(|raw| {
                EmailAddress::parse(raw).map_err(|_| ConfigValidationError::InvalidFromEmail)
            })
            .transpose()
    }

    /// Subject, body and attachment name for outgoing messages
    pub fn template(&self) -> DeliveryTemplate {
        DeliveryTemplate {
            subject: self.subject.clone(),
            body: self.body.clone(),
            attachment_name: self.attachment_name.clone(),
        }
    }

    /// Validate delivery configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.sender()?;
        if self.enabled && self.outbox_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingOutboxDir);
        }
        if self.attachment_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyAttachmentName);
        }
        Ok(())
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            outbox_dir: default_outbox_dir(),
            from_address: None,
            subject: default_subject(),
            body: default_body(),
            attachment_name: default_attachment_name(),
        }
    }
}

fn default_outbox_dir() -> PathBuf {
    PathBuf::from("outbox")
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

fn default_body() -> String {
    DEFAULT_BODY.to_string()
}

fn default_attachment_name() -> String {
    DEFAULT_ATTACHMENT_NAME.to_string()
}
