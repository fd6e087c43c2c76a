// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the dashboard read API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use vitrine_core::VitrineError;

use crate::server::GatewayState;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Query parameters for GET /messages.
#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    /// Restrict to one participant; omitted returns everything.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Response body for GET /transport-status.
#[derive(Debug, Serialize)]
pub struct TransportStatusResponse {
    pub connected: bool,
    pub identity: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub transport: String,
    pub timestamp: String,
}

/// GET /contacts
pub async fn get_contacts(State(state): State<GatewayState>) -> Response {
    match state.log.list_contacts().await {
        Ok(contacts) => Json(contacts).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /messages?phone=<id>
pub async fn get_messages(
    State(state): State<GatewayState>,
    Query(query): Query<MessagesQuery>,
) -> Response {
    match state.log.list_messages(query.phone.as_deref()).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /schedules
pub async fn get_schedules(State(state): State<GatewayState>) -> Response {
    match state.log.list_schedules().await {
        Ok(schedules) => Json(schedules).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /templates
pub async fn get_templates() -> Response {
    Json(vitrine_catalog::templates()).into_response()
}

/// GET /stats
pub async fn get_stats(State(state): State<GatewayState>) -> Response {
    match state.log.stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /transport-status
pub async fn get_transport_status(State(state): State<GatewayState>) -> Response {
    let status = state.channel.status().await;
    Json(TransportStatusResponse {
        connected: status.connected,
        identity: status.identity,
    })
    .into_response()
}

/// GET /health
///
/// Always answers 200: a disconnected transport is reported in the body,
/// not as an unhealthy process.
pub async fn get_health(State(state): State<GatewayState>) -> Response {
    let status = state.channel.status().await;
    Json(HealthResponse {
        status: "OK".to_string(),
        transport: if status.connected {
            "Connected".to_string()
        } else {
            "Disconnected".to_string()
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
    .into_response()
}

fn internal_error(e: VitrineError) -> Response {
    tracing::error!(error = %e, "gateway query failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}
