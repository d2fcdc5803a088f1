//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

/// Twilio REST API base URL.
pub const API_BASE: &str = "https://api.twilio.com/";

/// Channel scheme token applied to addresses.
pub const CHANNEL: &str = "whatsapp";

/// Sender address: the Twilio WhatsApp sandbox number.
pub const SENDER: &str = "+14155238886";

/// Address the HTTP adapter listens on.
pub const BIND: &str = "0.0.0.0:3000";

/// Default output path for `init`.
pub const CONFIG_FILE: &str = "whatsapp-relay.toml";
