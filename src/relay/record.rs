//! The outbound-message record written by upstream producers.

use serde::{Deserialize, Serialize};

/// Field names of [`OutboundMessageRecord`], as they appear on the wire.
pub mod field {
    /// Recipient phone number.
    pub const PHONE: &str = "phone";
    /// Message text.
    pub const TEXT: &str = "text";
}

/// A message record as stored in the record store (`{ phone, text }`).
///
/// Both fields are optional so that incomplete records can be represented
/// and rejected by the relay instead of failing to deserialize. Any other
/// document fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessageRecord {
    /// Recipient address in phone-number form (e.g. `+905551234567`).
    #[serde(default)]
    pub phone: Option<String>,
    /// Message body.
    #[serde(default)]
    pub text: Option<String>,
}

impl OutboundMessageRecord {
    /// Creates a record with both fields present.
    #[must_use]
    pub fn new(phone: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            text: Some(text.into()),
        }
    }

    /// Returns the recipient, treating absence as empty.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.phone.as_deref().unwrap_or_default()
    }

    /// Returns the body, treating absence as empty.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

/// Masks a phone number for logging, keeping only the last four characters.
///
/// Short values are masked entirely.
#[must_use]
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let hidden = chars.len() - 4;
    let mut masked = "*".repeat(hidden);
    masked.extend(&chars[hidden..]);
    masked
}
