//! Shared test fixtures for relay, server and event adapter tests.

use crate::gateway::{MessagingGateway, ProviderError, ProviderMessageId};
use std::sync::Mutex;
use std::time::Duration;

/// A recorded `send` call: `(from, to, body)`.
pub type SentCall = (String, String, String);

/// Mock gateway that records every call and answers with a fixed result.
pub struct MockGateway {
    result: Result<ProviderMessageId, ProviderError>,
    delay: Option<Duration>,
    calls: Mutex<Vec<SentCall>>,
}

impl MockGateway {
    pub fn returning_id(id: &str) -> Self {
        Self {
            result: Ok(ProviderMessageId::new(id)),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            result: Err(error),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes every call take `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<SentCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl MessagingGateway for MockGateway {
    async fn send(
        &self,
        from: &str,
        to: &str,
        body: &str,
    ) -> Result<ProviderMessageId, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((from.to_string(), to.to_string(), body.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.result.clone()
    }
}

/// Twilio's error for a malformed recipient.
pub fn invalid_to_number() -> ProviderError {
    ProviderError::new("Invalid 'To' number")
        .with_code("21211")
        .with_more_info("https://www.twilio.com/docs/errors/21211")
        .with_status(400)
}
