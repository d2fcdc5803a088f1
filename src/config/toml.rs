//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Messaging provider section
    #[serde(default)]
    pub provider: ProviderSection,

    /// Channel and sender section
    #[serde(default)]
    pub channel: ChannelSection,

    /// HTTP endpoint section
    #[serde(default)]
    pub server: ServerSection,

    /// Relay behaviour section
    #[serde(default)]
    pub relay: RelaySection,
}

/// Messaging provider section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    /// Account SID
    pub account_sid: Option<String>,

    /// Auth token
    pub auth_token: Option<String>,

    /// REST API base URL
    pub api_base: Option<String>,
}

/// Channel section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelSection {
    /// Scheme token prefixed to addresses
    pub scheme: Option<String>,

    /// Sender address
    pub from: Option<String>,
}

/// HTTP endpoint section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Listen address
    pub bind: Option<String>,
}

/// Relay section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelaySection {
    /// Provider call timeout in seconds
    pub timeout: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# whatsapp-relay configuration file

[provider]
# Twilio account SID (required; or --account-sid / TWILIO_ACCOUNT_SID)
# account_sid = "ACxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"

# Twilio auth token (required; or --auth-token / TWILIO_AUTH_TOKEN)
# auth_token = "your-auth-token"

# REST API base URL (default: https://api.twilio.com/)
# api_base = "https://api.twilio.com/"

[channel]
# Scheme token prefixed to both addresses (default: "whatsapp").
# Use "" to send plain SMS.
# scheme = "whatsapp"

# Sender address (default: the Twilio WhatsApp sandbox number)
# from = "+14155238886"

[server]
# Listen address for POST /send-whatsapp (default: 0.0.0.0:3000)
# bind = "0.0.0.0:3000"

[relay]
# Timeout in seconds for each provider call (default: no timeout)
# timeout = 15
"#
    .to_string()
}
