// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound webhook routes for the messaging bridge.
//!
//! The bridge POSTs each received message as a JSON event; the handler maps
//! it onto [`InboundMessage`] and queues it for the dialog engine. Delivery
//! to the engine is fire-and-forget from the bridge's point of view.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use vitrine_core::InboundMessage;

/// Shared state for the webhook handlers.
#[derive(Clone)]
pub struct TransportState {
    /// Queue into the dialog engine's dispatch loop.
    pub inbound_tx: mpsc::Sender<InboundMessage>,
}

/// Wire shape of a bridge event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeEvent {
    pub sender_id: String,
    pub body: String,
    #[serde(default)]
    pub contact: Option<BridgeContact>,
}

/// Contact info attached to a bridge event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeContact {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct AcceptedResponse {
    accepted: bool,
}

impl From<BridgeEvent> for InboundMessage {
    fn from(event: BridgeEvent) -> Self {
        InboundMessage {
            sender_id: event.sender_id,
            body: event.body,
            display_name: event.contact.and_then(|c| c.display_name),
        }
    }
}

/// Webhook routes, mounted next to the read API.
pub fn routes(state: TransportState) -> Router {
    Router::new()
        .route("/transport/events", post(post_event))
        .with_state(state)
}

/// POST /transport/events
///
/// Accepts one bridge event and queues it. Responds 202 once queued; a full
/// queue answers 503 so the bridge can retry with its own backoff.
async fn post_event(
    State(state): State<TransportState>,
    Json(event): Json<BridgeEvent>,
) -> Response {
    let inbound: InboundMessage = event.into();
    debug!(
        sender_id = inbound.sender_id.as_str(),
        "bridge event received"
    );

    match state.inbound_tx.try_send(inbound) {
        Ok(()) => (StatusCode::ACCEPTED, Json(AcceptedResponse { accepted: true }))
            .into_response(),
        Err(e) => {
            warn!(error = %e, "inbound queue rejected bridge event");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(AcceptedResponse { accepted: false }),
            )
                .into_response()
        }
    }
}
