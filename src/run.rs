//! Application execution logic.
//!
//! Builds the gateway and relay from the validated configuration and runs
//! the selected adapter until it finishes or a shutdown signal arrives.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::signal;

use whatsapp_relay::config::{Command, ValidatedConfig};
use whatsapp_relay::events::{self, feed};
use whatsapp_relay::gateway::{ReqwestClient, TwilioGateway};
use whatsapp_relay::relay::{Relay, RelayError, SendOutcome};
use whatsapp_relay::server;

/// The relay as wired for production.
type AppRelay = Relay<TwilioGateway<ReqwestClient>>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The provider endpoint could not be derived from the API base URL.
    #[error("Invalid provider endpoint: {0}")]
    Endpoint(#[source] url::ParseError),

    /// The HTTP server failed to bind or crashed.
    #[error("HTTP server error: {0}")]
    Server(#[source] std::io::Error),

    /// The change feed could not be opened.
    #[error("Failed to open change feed '{}': {source}", path.display())]
    Feed {
        /// Path of the feed file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A one-shot send was not accepted.
    #[error("Send failed: {0}")]
    Send(#[source] RelayError),
}

/// Executes the selected subcommand.
///
/// # Errors
///
/// Returns an error if:
/// - The provider endpoint URL cannot be built
/// - The HTTP server cannot bind its address
/// - The change feed file cannot be opened
/// - A one-shot `send` is rejected
///
/// # Coverage Note
///
/// Excluded from coverage because it requires network access and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: Command, config: ValidatedConfig) -> Result<(), RunError> {
    let relay = Arc::new(create_relay(&config)?);

    match command {
        Command::Serve => server::serve(relay, config.bind, shutdown_signal())
            .await
            .map_err(RunError::Server),
        // Handled before configuration is loaded.
        Command::Init { .. } => Ok(()),
        Command::Watch { input } => run_watch(relay, input).await,
        Command::Send { to, text } => run_send(&relay, &to, &text).await,
    }
}

/// Creates the relay and its Twilio gateway from configuration.
fn create_relay(config: &ValidatedConfig) -> Result<AppRelay, RunError> {
    let gateway = TwilioGateway::new(
        ReqwestClient::new(),
        config.credentials.clone(),
        &config.api_base,
    )
        .map_err(RunError::Endpoint)?
        .with_channel(config.channel.clone());

    Ok(Relay::new(gateway, config.sender.clone()).with_timeout(config.timeout))
}

/// Relays a change feed until it ends or a shutdown signal arrives.
///
/// Excluded from coverage - requires signal handling.
#[cfg(not(tarpaulin_include))]
async fn run_watch(relay: Arc<AppRelay>, input: Option<PathBuf>) -> Result<(), RunError> {
    let summary = match input {
        Some(path) => {
            tracing::info!("Relaying change feed from {}", path.display());
            let stream = feed::file(path.clone())
                .await
                .map_err(|source| RunError::Feed { path, source })?;
            watch_until_shutdown(relay, stream).await
        }
        None => {
            tracing::info!("Relaying change feed from stdin");
            watch_until_shutdown(relay, feed::stdin()).await
        }
    };

    tracing::info!("Change feed finished: {summary}");
    Ok(())
}

/// Runs the dispatch loop until the feed ends or a shutdown signal arrives.
#[cfg(not(tarpaulin_include))]
async fn watch_until_shutdown<S>(relay: Arc<AppRelay>, stream: S) -> events::DispatchSummary
where
    S: tokio_stream::Stream<Item = events::MessageCreated>,
{
    events::run_until(relay, stream, shutdown_signal()).await
}

/// Sends one message and reports the provider id on stdout.
async fn run_send(relay: &AppRelay, to: &str, text: &str) -> Result<(), RunError> {
    report_send(relay.relay(to, text).await)
}

/// Maps a one-shot send outcome to the command result.
fn report_send(outcome: SendOutcome) -> Result<(), RunError> {
    match outcome {
        SendOutcome::Sent {
            provider_message_id,
        } => {
            println!("{provider_message_id}");
            Ok(())
        }
        SendOutcome::Failed(e) => Err(RunError::Send(e)),
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
