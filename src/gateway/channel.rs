//! Channel-prefixed addressing.

use std::fmt;

/// The messaging channel a gateway delivers on, identified by its scheme token.
///
/// Twilio selects the channel from a prefix on each address: `whatsapp:+905551234567`
/// goes out over WhatsApp, a bare `+905551234567` goes out as SMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    scheme: String,
}

impl Channel {
    /// The WhatsApp channel (`whatsapp:` prefix).
    pub const WHATSAPP: &'static str = "whatsapp";

    /// Creates a channel from its scheme token.
    ///
    /// A trailing `:` is accepted and stripped. An empty scheme means
    /// addresses are used as given.
    #[must_use]
    pub fn new(scheme: impl Into<String>) -> Self {
        let scheme = scheme.into();
        let scheme = scheme.trim().trim_end_matches(':').to_string();
        Self { scheme }
    }

    /// Creates the WhatsApp channel.
    #[must_use]
    pub fn whatsapp() -> Self {
        Self::new(Self::WHATSAPP)
    }

    /// Returns the scheme token.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns `raw` in channel-prefixed form.
    ///
    /// Addresses that already carry this channel's prefix are returned unchanged.
    #[must_use]
    pub fn address(&self, raw: &str) -> String {
        if self.scheme.is_empty() {
            return raw.to_string();
        }

        let prefixed = raw
            .strip_prefix(self.scheme.as_str())
            .is_some_and(|rest| rest.starts_with(':'));

        if prefixed {
            raw.to_string()
        } else {
            format!("{}:{raw}", self.scheme)
        }
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::whatsapp()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scheme.is_empty() {
            f.write_str("sms")
        } else {
            f.write_str(&self.scheme)
        }
    }
}
