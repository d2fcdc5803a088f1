//! The relay trigger: validate, send once, report.

use std::time::Duration;

use crate::gateway::{MessagingGateway, ProviderMessageId};

use super::{OutboundMessageRecord, RelayError, SendOutcome, field, mask_phone};

/// Relays outbound-message records through a [`MessagingGateway`].
///
/// Constructed once with its collaborators and shared (typically behind an
/// `Arc`) by every adapter. Holds no mutable state, so concurrent
/// invocations need no locking.
///
/// # Example
///
/// ```no_run
/// use whatsapp_relay::gateway::{Credentials, ReqwestClient, TwilioGateway};
/// use whatsapp_relay::relay::Relay;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let base = url::Url::parse("https://api.twilio.com/")?;
/// let gateway = TwilioGateway::new(ReqwestClient::new(), Credentials::new("AC...", "token"), &base)?;
/// let relay = Relay::new(gateway, "+14155238886");
///
/// let outcome = relay.relay("+905551234567", "Randevu hatırlatma").await;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Relay<G> {
    gateway: G,
    sender: String,
    timeout: Option<Duration>,
}

impl<G> Relay<G> {
    /// Creates a relay sending from the fixed `sender` address, with no timeout.
    #[must_use]
    pub fn new(gateway: G, sender: impl Into<String>) -> Self {
        Self {
            gateway,
            sender: sender.into(),
            timeout: None,
        }
    }

    /// Bounds each gateway call by `timeout`. `None` waits indefinitely.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the fixed sender address.
    #[must_use]
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the underlying gateway.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }
}

impl<G: MessagingGateway> Relay<G> {
    /// Relays one message to `recipient`.
    ///
    /// Empty `recipient` or `body` fails with [`RelayError::MissingField`]
    /// without contacting the gateway. Otherwise the gateway is called
    /// exactly once and its result is returned as-is.
    pub async fn relay(&self, recipient: &str, body: &str) -> SendOutcome {
        let result = match validate(recipient, body) {
            Ok(()) => self.send(recipient, body).await,
            Err(e) => Err(e),
        };

        report(recipient, &result);
        result.into()
    }

    /// Relays a stored record. Absent fields are treated as empty.
    pub async fn relay_record(&self, record: &OutboundMessageRecord) -> SendOutcome {
        self.relay(record.phone(), record.text()).await
    }

    async fn send(&self, recipient: &str, body: &str) -> Result<ProviderMessageId, RelayError> {
        tracing::debug!(
            to = %mask_phone(recipient),
            chars = body.chars().count(),
            "Sending message"
        );

        let send = self.gateway.send(&self.sender, recipient, body);

        match self.timeout {
            Some(after) => tokio::time::timeout(after, send)
                .await
                .map_err(|_| RelayError::Timeout { after })?
                .map_err(RelayError::from),
            None => send.await.map_err(RelayError::from),
        }
    }
}

fn validate(recipient: &str, body: &str) -> Result<(), RelayError> {
    if recipient.is_empty() {
        return Err(RelayError::MissingField {
            field: field::PHONE,
        });
    }
    if body.is_empty() {
        return Err(RelayError::MissingField {
            field: field::TEXT,
        });
    }
    Ok(())
}

fn report(recipient: &str, result: &Result<ProviderMessageId, RelayError>) {
    let to = mask_phone(recipient);
    match result {
        Ok(id) => tracing::info!(%to, sid = %id, "Message sent"),
        Err(RelayError::MissingField { field }) => {
            tracing::debug!(field, "Message not sent: missing required field");
        }
        Err(RelayError::Provider(e)) => tracing::error!(
            %to,
            code = e.code.as_deref().unwrap_or("-"),
            "Provider error: {e}"
        ),
        Err(e @ RelayError::Timeout { .. }) => tracing::error!(%to, "{e}"),
    }
}
