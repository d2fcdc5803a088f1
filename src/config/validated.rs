//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::gateway::{Channel, Credentials};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Provider account credentials (required)
    pub credentials: Credentials,

    /// Provider REST API base URL
    pub api_base: Url,

    /// Channel whose prefix is applied to addresses
    pub channel: Channel,

    /// Fixed sender address
    pub sender: String,

    /// Listen address of the HTTP endpoint
    pub bind: SocketAddr,

    /// Bound on each provider call; `None` waits indefinitely
    pub timeout: Option<Duration>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeout = self
            .timeout
            .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs()));

        write!(
            f,
            "Config {{ account_sid: {}, api_base: {}, channel: {}, from: {}, bind: {}, timeout: {} }}",
            self.credentials.account_sid,
            self.api_base,
            self.channel,
            self.sender,
            self.bind,
            timeout,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and their environment fallbacks) take precedence over TOML values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Credentials are missing or empty
    /// - The API base URL is invalid or not HTTP(S)
    /// - The bind address is invalid
    /// - The timeout is zero
    /// - The sender address is empty
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let credentials = Self::resolve_credentials(cli, toml)?;
        let api_base = Self::resolve_api_base(cli, toml)?;
        let channel = Self::resolve_channel(cli, toml);
        let sender = Self::resolve_sender(cli, toml)?;
        let bind = Self::resolve_bind(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;

        Ok(Self {
            credentials,
            api_base,
            channel,
            sender,
            bind,
            timeout,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_credentials(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Credentials, ConfigError> {
        let account_sid = non_empty(cli.account_sid.as_deref())
            .or_else(|| non_empty(toml.and_then(|t| t.provider.account_sid.as_deref())))
        .ok_or_else(|| {
            ConfigError::missing(
                field::ACCOUNT_SID,
                "Use --account-sid, TWILIO_ACCOUNT_SID or set provider.account_sid in config file",
            )
        })?;

        let auth_token = non_empty(cli.auth_token.as_deref())
            .or_else(|| non_empty(toml.and_then(|t| t.provider.auth_token.as_deref())))
        .ok_or_else(|| {
            ConfigError::missing(
                field::AUTH_TOKEN,
                "Use --auth-token, TWILIO_AUTH_TOKEN or set provider.auth_token in config file",
            )
        })?;

        Ok(Credentials::new(account_sid, auth_token))
    }

    fn resolve_api_base(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let url_str = cli
            .api_base
            .as_deref()
            .or_else(|| toml.and_then(|t| t.provider.api_base.as_deref()))
            .unwrap_or(defaults::API_BASE);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url)
    }

    fn resolve_channel(cli: &Cli, toml: Option<&TomlConfig>) -> Channel {
        let scheme = cli
            .channel
            .as_deref()
            .or_else(|| toml.and_then(|t| t.channel.scheme.as_deref()))
            .unwrap_or(defaults::CHANNEL);

        Channel::new(scheme)
    }

    fn resolve_sender(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let sender = cli
            .from
            .as_deref()
            .or_else(|| toml.and_then(|t| t.channel.from.as_deref()))
            .unwrap_or(defaults::SENDER)
            .trim();

        if sender.is_empty() {
            return Err(ConfigError::EmptySender);
        }

        Ok(sender.to_string())
    }

    fn resolve_bind(cli: &Cli, toml: Option<&TomlConfig>) -> Result<SocketAddr, ConfigError> {
        let bind = cli
            .bind
            .as_deref()
            .or_else(|| toml.and_then(|t| t.server.bind.as_deref()))
            .unwrap_or(defaults::BIND);

        bind.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidBind {
            value: bind.to_string(),
            reason: e.to_string(),
        })
    }

    fn resolve_timeout(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<Duration>, ConfigError> {
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.relay.timeout));

        match seconds {
            None => Ok(None),
            Some(0) => Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            }),
            Some(secs) => Ok(Some(Duration::from_secs(secs))),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
