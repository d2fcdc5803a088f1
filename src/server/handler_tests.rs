//! Tests for the send endpoint.

use super::handler::outcome_response;
use super::{ErrorBody, MISSING_FIELDS_MESSAGE, SEND_PATH, SendRequest, SentBody, send_whatsapp};
use crate::relay::{Relay, RelayError, SendOutcome};
use crate::test_fixtures::{MockGateway, invalid_to_number};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use std::sync::Arc;
use std::time::Duration;

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn relay(gateway: MockGateway) -> Arc<Relay<MockGateway>> {
    Arc::new(Relay::new(gateway, "+14155238886"))
}

mod handler {
    use super::*;

    #[tokio::test]
    async fn sent_returns_200_with_sid() {
        let relay = relay(MockGateway::returning_id("SM123"));
        let request = SendRequest::new("+905551234567", "Randevu hatırlatma");

        let response = send_whatsapp(State(relay.clone()), Ok(Json(request))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"success": true, "sid": "SM123"})
        );
        assert_eq!(relay.gateway().call_count(), 1);
    }

    #[tokio::test]
    async fn empty_phone_returns_400_without_sending() {
        let relay = relay(MockGateway::returning_id("SM123"));
        let request = SendRequest::new("", "hello");

        let response = send_whatsapp(State(relay.clone()), Ok(Json(request))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "phone ve text zorunlu"})
        );
        assert_eq!(relay.gateway().call_count(), 0);
    }

    #[tokio::test]
    async fn provider_failure_returns_500_with_code_and_more_info() {
        let relay = relay(MockGateway::failing(invalid_to_number()));
        let request = SendRequest::new("bogus", "hello");

        let response = send_whatsapp(State(relay), Ok(Json(request))).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "error": "Invalid 'To' number",
                "code": "21211",
                "moreInfo": "https://www.twilio.com/docs/errors/21211",
            })
        );
    }
}

mod outcome_mapping {
    use super::*;
    use crate::gateway::ProviderError;

    #[tokio::test]
    async fn transport_failure_omits_code_and_more_info() {
        let response = outcome_response(SendOutcome::Failed(RelayError::Provider(
            ProviderError::new("Request timed out"),
        )));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Request timed out"})
        );
    }

    #[tokio::test]
    async fn relay_timeout_is_500() {
        let response = outcome_response(SendOutcome::Failed(RelayError::Timeout {
            after: Duration::from_secs(3),
        }));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(body.error, "Provider request timed out after 3s");
        assert!(body.code.is_none());
    }
}

mod over_http {
    use super::*;
    use crate::server::serve_on;

    /// Starts the server on an ephemeral port and returns the send URL.
    async fn spawn_server(relay: Arc<Relay<MockGateway>>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve_on(relay, listener, std::future::pending()));
        format!("http://{addr}{SEND_PATH}")
    }

    #[tokio::test]
    async fn json_round_trip_returns_sid() {
        let relay = relay(MockGateway::returning_id("SM123"));
        let url = spawn_server(relay.clone()).await;

        let response = reqwest::Client::new()
            .post(&url)
            .header("content-type", "application/json")
            .body(r#"{"phone":"+905551234567","text":"Randevu hatırlatma"}"#)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let body: SentBody = serde_json::from_slice(&response.bytes().await.unwrap()).unwrap();
        assert_eq!(
            body,
            SentBody {
                success: true,
                sid: "SM123".to_string()
            }
        );
    }

    #[tokio::test]
    async fn malformed_json_is_treated_as_missing_fields() {
        let relay = relay(MockGateway::returning_id("SM123"));
        let url = spawn_server(relay.clone()).await;

        let response = reqwest::Client::new()
            .post(&url)
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: ErrorBody = serde_json::from_slice(&response.bytes().await.unwrap()).unwrap();
        assert_eq!(body.error, MISSING_FIELDS_MESSAGE);
        assert_eq!(relay.gateway().call_count(), 0);
    }

    #[tokio::test]
    async fn missing_content_type_is_treated_as_missing_fields() {
        let relay = relay(MockGateway::returning_id("SM123"));
        let url = spawn_server(relay.clone()).await;

        let response = reqwest::Client::new()
            .post(&url)
            .body(r#"{"phone":"+1","text":"x"}"#)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        assert_eq!(relay.gateway().call_count(), 0);
    }

    #[tokio::test]
    async fn cors_preflight_is_allowed() {
        let relay = relay(MockGateway::returning_id("SM123"));
        let url = spawn_server(relay).await;

        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, &url)
            .header("origin", "http://localhost:8081")
            .header("access-control-request-method", "POST")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert!(
            response
                .headers()
                .contains_key("access-control-allow-origin")
        );
    }
}
