//! Provider transport: one form-encoded POST and its buffered reply.

use super::HttpError;

/// A form-encoded POST to the provider's REST API.
///
/// Fields keep their insertion order on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPost {
    /// Endpoint the form is posted to.
    pub url: url::Url,
    /// Value of the `Authorization` header, if any.
    pub authorization: Option<http::HeaderValue>,
    /// Form fields as `(name, value)` pairs.
    pub fields: Vec<(String, String)>,
}

impl FormPost {
    /// Creates an empty form post without credentials.
    #[must_use]
    pub const fn new(url: url::Url) -> Self {
        Self {
            url,
            authorization: None,
            fields: Vec::new(),
        }
    }

    /// Appends a form field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Sets the `Authorization` header value.
    #[must_use]
    pub fn with_authorization(mut self, value: http::HeaderValue) -> Self {
        self.authorization = Some(value);
        self
    }

    /// Encodes the fields as `application/x-www-form-urlencoded`.
    #[must_use]
    pub fn encoded(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.fields)
            .finish()
    }
}

/// Status and fully buffered body of a provider reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: http::StatusCode,
    pub body: Vec<u8>,
}

impl HttpReply {
    #[must_use]
    pub const fn new(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Transport used by the gateway to reach the provider.
///
/// Lets the gateway be exercised against a mock client in tests and keeps
/// reqwest out of the provider logic.
pub trait HttpClient: Send + Sync {
    /// Posts the form and returns the provider's reply, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when no reply was received: the connection
    /// failed, timed out, or the URL was rejected.
    fn post_form(
        &self,
        post: FormPost,
    ) -> impl std::future::Future<Output = Result<HttpReply, HttpError>> + Send;
}
