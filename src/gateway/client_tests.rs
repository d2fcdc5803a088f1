//! Tests for `ReqwestClient` against a local server.

use super::{FormPost, HttpClient, HttpError, ReqwestClient};
use std::sync::{Arc, Mutex};

type Seen = Arc<Mutex<Option<(http::HeaderMap, String)>>>;

/// Serves one endpoint that records the request and answers 201.
async fn capturing_server() -> (url::Url, Seen) {
    let seen: Seen = Arc::new(Mutex::new(None));
    let handler_seen = Arc::clone(&seen);
    let app = axum::Router::new().route(
        "/Messages.json",
        axum::routing::post(move |headers: http::HeaderMap, body: String| {
            let seen = Arc::clone(&handler_seen);
            async move {
                *seen.lock().unwrap() = Some((headers, body));
                (http::StatusCode::CREATED, r#"{"sid":"SM1"}"#)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let url = url::Url::parse(&format!("http://{addr}/Messages.json")).unwrap();
    (url, seen)
}

#[tokio::test]
async fn posts_form_body_with_headers() {
    let (url, seen) = capturing_server().await;
    let post = FormPost::new(url)
        .field("To", "whatsapp:+1")
        .field("Body", "a & b")
        .with_authorization(http::HeaderValue::from_static("Basic QUMxOnQ="));

    let reply = ReqwestClient::new().post_form(post).await.unwrap();

    assert_eq!(reply.status, http::StatusCode::CREATED);
    assert_eq!(reply.body_text(), Some(r#"{"sid":"SM1"}"#));

    let (headers, body) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(
        headers.get(http::header::CONTENT_TYPE).unwrap(),
        "application/x-www-form-urlencoded"
    );
    assert_eq!(headers.get(http::header::AUTHORIZATION).unwrap(), "Basic QUMxOnQ=");
    assert_eq!(body, "To=whatsapp%3A%2B1&Body=a+%26+b");
}

#[tokio::test]
async fn omits_authorization_when_unset() {
    let (url, seen) = capturing_server().await;

    ReqwestClient::default()
        .post_form(FormPost::new(url).field("Body", "x"))
        .await
        .unwrap();

    let (headers, _) = seen.lock().unwrap().clone().unwrap();
    assert!(headers.get(http::header::AUTHORIZATION).is_none());
}

#[tokio::test]
async fn refused_connection_is_a_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let url = url::Url::parse(&format!("http://{addr}/Messages.json")).unwrap();

    let error = ReqwestClient::new()
        .post_form(FormPost::new(url))
        .await
        .unwrap_err();

    assert!(matches!(error, HttpError::Connection(_)));
}

#[test]
fn client_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestClient>();
}
