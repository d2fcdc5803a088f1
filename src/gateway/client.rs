//! reqwest-backed provider transport.

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};

use super::{FormPost, HttpClient, HttpError, HttpReply};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// [`HttpClient`] over a pooled `reqwest::Client`.
///
/// Applies no request timeout; bounding provider calls is left to the relay.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn post_form(&self, post: FormPost) -> Result<HttpReply, HttpError> {
        let mut builder = self
            .inner
            .post(post.url.as_str())
            .header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
            .body(post.encoded());

        if let Some(authorization) = post.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else if e.is_builder() {
                HttpError::InvalidUrl(e.to_string())
            } else {
                HttpError::Connection(Box::new(e))
            }
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Connection(Box::new(e)))?
            .to_vec();

        Ok(HttpReply::new(status, body))
    }
}
