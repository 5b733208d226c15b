//! E-mail address value object for result delivery.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A recipient address accepted by the delivery channel.
///
/// Validation is loose: a non-empty local part, an `@`, and a
/// domain with at least one dot that has characters on both sides of it.
/// Anything after the first dotted domain segment is not inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and validates an address. Surrounding whitespace is trimmed.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !Self::is_well_formed(trimmed) {
            return Err(ValidationError::invalid_format(
                "email",
                "Invalid Email Format",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    fn is_well_formed(s: &str) -> bool {
        let Some((local, rest)) = s.split_once('@') else {
            return false;
        };
        if local.is_empty() {
            return false;
        }
        let segment = match rest.find('@') {
            Some(end) => &rest[..end],
            None => rest,
        };
        segment
            .char_indices()
            .any(|(i, c)| c == '.' && i >= 1 && i + 1 < segment.len())
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmailAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}
