//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// WhatsApp relay: forwards reminder messages to WhatsApp through Twilio.
///
/// Serves `POST /send-whatsapp` by default, or relays records from a
/// change feed with `watch`.
#[derive(Debug, Parser)]
#[command(name = "whatsapp-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: serve)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Twilio account SID
    #[arg(long = "account-sid", env = "TWILIO_ACCOUNT_SID", global = true)]
    pub account_sid: Option<String>,

    /// Twilio auth token
    #[arg(
        long = "auth-token",
        env = "TWILIO_AUTH_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub auth_token: Option<String>,

    /// Sender address on the messaging channel
    #[arg(long, global = true)]
    pub from: Option<String>,

    /// Channel scheme token prefixed to addresses ("" for plain SMS)
    #[arg(long, global = true)]
    pub channel: Option<String>,

    /// Provider REST API base URL
    #[arg(long = "api-base", global = true)]
    pub api_base: Option<String>,

    /// Address for the HTTP endpoint to listen on
    #[arg(long, global = true)]
    pub bind: Option<String>,

    /// Timeout in seconds for each provider call (default: none)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for whatsapp-relay
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Serve the HTTP send endpoint
    Serve,

    /// Relay records from a newline-delimited JSON change feed
    Watch {
        /// Feed file to read (default: standard input)
        #[arg(long, short)]
        input: Option<PathBuf>,
    },

    /// Send a single message and exit
    Send {
        /// Recipient phone number
        #[arg(long)]
        to: String,

        /// Message text
        #[arg(long)]
        text: String,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns the subcommand to run, defaulting to [`Command::Serve`].
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
