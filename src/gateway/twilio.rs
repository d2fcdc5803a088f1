//! The send capability and its Twilio Messages API implementation.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::HeaderValue;
use serde::Deserialize;

use super::{Channel, FormPost, HttpClient, HttpReply, ProviderError};

/// Identifier the provider assigns to an accepted message (a Twilio `SM...` sid).
///
/// Confirms acceptance for delivery, not receipt on the recipient's device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderMessageId(String);

impl ProviderMessageId {
    /// Wraps a provider-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the identifier.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProviderMessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for handing a single message to an external messaging provider.
///
/// Implementations make one outbound call per invocation, keep no state
/// between calls and never retry.
pub trait MessagingGateway: Send + Sync {
    /// Submits `body` for delivery from `from` to `to`.
    ///
    /// Addresses are given in raw form; the gateway applies its channel prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider rejects the request or
    /// cannot be reached.
    fn send(
        &self,
        from: &str,
        to: &str,
        body: &str,
    ) -> impl std::future::Future<Output = Result<ProviderMessageId, ProviderError>> + Send;
}

/// Pre-provisioned provider account credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account identifier (`AC...`).
    pub account_sid: String,
    /// Auth token paired with the account.
    pub auth_token: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Returns the `Authorization` header value for HTTP Basic auth.
    fn basic_auth(&self) -> String {
        let raw = format!("{}:{}", self.account_sid, self.auth_token);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"***")
            .finish()
    }
}

/// Successful message creation response (only the fields we read).
#[derive(Deserialize)]
struct MessageResource {
    sid: String,
}

/// Error body returned by the Twilio REST API.
#[derive(Deserialize)]
struct ErrorResource {
    code: Option<serde_json::Value>,
    message: Option<String>,
    more_info: Option<String>,
}

/// [`MessagingGateway`] backed by the Twilio Messages API.
///
/// Holds only immutable credentials and can be shared across concurrent
/// sends.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
#[derive(Debug)]
pub struct TwilioGateway<H> {
    client: H,
    credentials: Credentials,
    channel: Channel,
    messages_url: url::Url,
}

impl<H> TwilioGateway<H> {
    /// Creates a gateway for the account in `credentials`, rooted at `api_base`.
    ///
    /// Uses the WhatsApp channel; see [`TwilioGateway::with_channel`].
    ///
    /// # Errors
    ///
    /// Returns an error if the messages endpoint cannot be derived from `api_base`.
    pub fn new(
        client: H,
        credentials: Credentials,
        api_base: &url::Url,
    ) -> Result<Self, url::ParseError> {
        let messages_url = messages_url(api_base, &credentials.account_sid)?;
        Ok(Self {
            client,
            credentials,
            channel: Channel::whatsapp(),
            messages_url,
        })
    }

    /// Sets the channel whose prefix is applied to both addresses.
    #[must_use]
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    /// Returns the configured channel.
    #[must_use]
    pub const fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Returns the messages endpoint requests are posted to.
    #[must_use]
    pub const fn messages_url(&self) -> &url::Url {
        &self.messages_url
    }

    /// Builds the create-message form.
    fn build_request(&self, from: &str, to: &str, body: &str) -> FormPost {
        let post = FormPost::new(self.messages_url.clone())
            .field("From", self.channel.address(from))
            .field("To", self.channel.address(to))
            .field("Body", body);

        // Account sids and tokens are ASCII; anything else is left to the provider to reject.
        match HeaderValue::from_str(&self.credentials.basic_auth()) {
            Ok(value) => post.with_authorization(value),
            Err(_) => post,
        }
    }
}

impl<H: HttpClient> MessagingGateway for TwilioGateway<H> {
    async fn send(
        &self,
        from: &str,
        to: &str,
        body: &str,
    ) -> Result<ProviderMessageId, ProviderError> {
        let request = self.build_request(from, to, body);
        let response = self.client.post_form(request).await?;
        parse_response(&response)
    }
}

/// Derives `{base}/2010-04-01/Accounts/{sid}/Messages.json`.
fn messages_url(api_base: &url::Url, account_sid: &str) -> Result<url::Url, url::ParseError> {
    let mut base = api_base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("2010-04-01/Accounts/{account_sid}/Messages.json"))
}

/// Maps a provider response to a message id or a [`ProviderError`].
fn parse_response(response: &HttpReply) -> Result<ProviderMessageId, ProviderError> {
    let status = response.status.as_u16();

    if response.status.is_success() {
        return serde_json::from_slice::<MessageResource>(&response.body)
            .map(|resource| ProviderMessageId::new(resource.sid))
            .map_err(|e| {
                ProviderError::new(format!("Unexpected provider response: {e}"))
                    .with_status(status)
            });
    }

    let Ok(resource) = serde_json::from_slice::<ErrorResource>(&response.body) else {
        let body = response.body_text().unwrap_or_default();
        return Err(
            ProviderError::new(format!("Provider returned HTTP {}: {body}", response.status))
                .with_status(status),
        );
    };

    let mut error = ProviderError::new(
        resource
            .message
            .unwrap_or_else(|| format!("Provider returned HTTP {}", response.status)),
    )
    .with_status(status);

    error.code = resource.code.and_then(|code| match code {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    error.more_info = resource.more_info;

    Err(error)
}
