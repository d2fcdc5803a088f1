//! Per-event relay and the dispatch loop.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tokio::task::JoinSet;
use tokio_stream::{Stream, StreamExt};

use crate::gateway::MessagingGateway;
use crate::relay::{OutboundMessageRecord, Relay, RelayError, SendOutcome};

/// A record-created notification from the messages collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageCreated {
    /// Document id, when the feed provides one. Used for logging only.
    #[serde(default)]
    pub id: Option<String>,
    /// The newly created record.
    #[serde(flatten)]
    pub record: OutboundMessageRecord,
}

impl MessageCreated {
    /// Creates an event for `record` with the given document id.
    #[must_use]
    pub fn new(id: impl Into<String>, record: OutboundMessageRecord) -> Self {
        Self {
            id: Some(id.into()),
            record,
        }
    }

    fn doc_id(&self) -> &str {
        self.id.as_deref().unwrap_or("-")
    }
}

/// Counts of outcomes over one run of the dispatch loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Messages the provider accepted.
    pub sent: usize,
    /// Messages the provider rejected or that timed out.
    pub failed: usize,
    /// Records skipped for missing fields.
    pub skipped: usize,
}

impl DispatchSummary {
    fn record(&mut self, outcome: &SendOutcome) {
        match outcome {
            SendOutcome::Sent { .. } => self.sent += 1,
            SendOutcome::Failed(RelayError::MissingField { .. }) => self.skipped += 1,
            SendOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Total number of events handled.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.sent + self.failed + self.skipped
    }
}

impl fmt::Display for DispatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sent, {} failed, {} skipped",
            self.sent, self.failed, self.skipped
        )
    }
}

/// Relays one event and logs the outcome.
///
/// The outcome is returned for accounting; callers have no one to report it to.
pub async fn dispatch<G: MessagingGateway>(relay: &Relay<G>, event: &MessageCreated) -> SendOutcome {
    let outcome = relay.relay_record(&event.record).await;

    match &outcome {
        SendOutcome::Sent {
            provider_message_id,
        } => tracing::info!(doc = event.doc_id(), sid = %provider_message_id, "Relayed record"),
        SendOutcome::Failed(e @ RelayError::MissingField { .. }) => {
            tracing::debug!(doc = event.doc_id(), "Skipping record: {e}");
        }
        SendOutcome::Failed(e) => {
            tracing::error!(doc = event.doc_id(), "Failed to relay record: {e}");
        }
    }

    outcome
}

/// Relays every event from `events` until the stream ends.
///
/// Events are dispatched concurrently as they arrive; no ordering is
/// preserved between them. Waits for in-flight sends before returning.
pub async fn run<G, S>(relay: Arc<Relay<G>>, events: S) -> DispatchSummary
where
    G: MessagingGateway + 'static,
    S: Stream<Item = MessageCreated>,
{
    run_until(relay, events, std::future::pending()).await
}

/// Like [`run`], but stops taking new events once `shutdown` completes.
///
/// Sends already started are not cancelled; they are awaited before returning.
pub async fn run_until<G, S, F>(relay: Arc<Relay<G>>, events: S, shutdown: F) -> DispatchSummary
where
    G: MessagingGateway + 'static,
    S: Stream<Item = MessageCreated>,
    F: Future<Output = ()>,
{
    let mut summary = DispatchSummary::default();
    let mut in_flight = JoinSet::new();

    tokio::pin!(events);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Stopped reading change feed, waiting for {} in-flight send(s)", in_flight.len());
                break;
            }
            event = events.next() => {
                let Some(event) = event else { break };
                let relay = Arc::clone(&relay);
                in_flight.spawn(async move { dispatch(&relay, &event).await });
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                collect(&mut summary, joined);
            }
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        collect(&mut summary, joined);
    }

    summary
}

fn collect(summary: &mut DispatchSummary, joined: Result<SendOutcome, tokio::task::JoinError>) {
    match joined {
        Ok(outcome) => summary.record(&outcome),
        Err(e) => {
            tracing::error!("Relay task failed: {e}");
            summary.failed += 1;
        }
    }
}
