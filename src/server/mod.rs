//! Request-driven adapter: the `POST /send-whatsapp` HTTP endpoint.
//!
//! The handler decodes `{ "phone", "text" }`, runs [`Relay::relay`] and maps
//! the [`SendOutcome`](crate::relay::SendOutcome) to a status and JSON body:
//!
//! | Outcome                | Status | Body                                        |
//! |------------------------|--------|---------------------------------------------|
//! | sent                   | 200    | `{"success": true, "sid": ...}`             |
//! | missing/invalid fields | 400    | `{"error": "phone ve text zorunlu"}`        |
//! | provider failure       | 500    | `{"error": ..., "code": ..., "moreInfo": ...}` |
//!
//! `code` and `moreInfo` are omitted when the provider did not supply them.

mod handler;

#[cfg(test)]
mod handler_tests;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use tower_http::cors::CorsLayer;

use crate::gateway::MessagingGateway;
use crate::relay::Relay;

pub use handler::{ErrorBody, MISSING_FIELDS_MESSAGE, SendRequest, SentBody, send_whatsapp};

/// Path of the send endpoint.
pub const SEND_PATH: &str = "/send-whatsapp";

/// Builds the router serving [`SEND_PATH`] with permissive CORS.
pub fn router<G>(relay: Arc<Relay<G>>) -> Router
where
    G: MessagingGateway + 'static,
{
    Router::new()
        .route(SEND_PATH, post(send_whatsapp::<G>))
        .layer(CorsLayer::permissive())
        .with_state(relay)
}

/// Serves the router on `addr` until `shutdown` completes.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve<G, F>(relay: Arc<Relay<G>>, addr: SocketAddr, shutdown: F) -> std::io::Result<()>
where
    G: MessagingGateway + 'static,
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve_on(relay, listener, shutdown).await
}

/// Serves the router on an already bound listener until `shutdown` completes.
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve_on<G, F>(
    relay: Arc<Relay<G>>,
    listener: tokio::net::TcpListener,
    shutdown: F,
) -> std::io::Result<()>
where
    G: MessagingGateway + 'static,
    F: std::future::Future<Output = ()> + Send + 'static,
{
    tracing::info!("Listening on http://{} (POST {SEND_PATH})", listener.local_addr()?);

    axum::serve(listener, router(relay))
        .with_graceful_shutdown(shutdown)
        .await
}
