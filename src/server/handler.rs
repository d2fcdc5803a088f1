//! Handler and wire bodies for the send endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::gateway::MessagingGateway;
use crate::relay::{OutboundMessageRecord, Relay, RelayError, SendOutcome};

/// Error text returned when `phone` or `text` is missing.
pub const MISSING_FIELDS_MESSAGE: &str = "phone ve text zorunlu";

/// Request body: the same two fields as a stored record.
pub type SendRequest = OutboundMessageRecord;

/// Body of a `200 OK` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentBody {
    /// Always `true`.
    pub success: bool,
    /// Provider message id.
    pub sid: String,
}

/// Body of a `400` or `500` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error.
    pub error: String,
    /// Provider error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Provider documentation link.
    #[serde(
        default,
        rename = "moreInfo",
        skip_serializing_if = "Option::is_none"
    )]
    pub more_info: Option<String>,
}

impl ErrorBody {
    fn missing_fields() -> Self {
        Self {
            error: MISSING_FIELDS_MESSAGE.to_string(),
            code: None,
            more_info: None,
        }
    }
}

/// `POST /send-whatsapp`.
///
/// A body that is not a JSON object with string `phone`/`text` fields is
/// treated the same as one with the fields missing.
pub async fn send_whatsapp<G: MessagingGateway>(
    State(relay): State<Arc<Relay<G>>>,
    payload: Result<Json<SendRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Rejected request body: {rejection}");
            return (StatusCode::BAD_REQUEST, Json(ErrorBody::missing_fields())).into_response();
        }
    };

    outcome_response(relay.relay_record(&request).await)
}

/// Maps a relay outcome to the endpoint's HTTP response.
pub(crate) fn outcome_response(outcome: SendOutcome) -> Response {
    match outcome {
        SendOutcome::Sent {
            provider_message_id,
        } => (
            StatusCode::OK,
            Json(SentBody {
                success: true,
                sid: provider_message_id.into_inner(),
            }),
        )
            .into_response(),
        SendOutcome::Failed(RelayError::MissingField { .. }) => {
            (StatusCode::BAD_REQUEST, Json(ErrorBody::missing_fields())).into_response()
        }
        SendOutcome::Failed(RelayError::Provider(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: e.message,
                code: e.code,
                more_info: e.more_info,
            }),
        )
            .into_response(),
        SendOutcome::Failed(e @ RelayError::Timeout { .. }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: e.to_string(),
                code: None,
                more_info: None,
            }),
        )
            .into_response(),
    }
}
