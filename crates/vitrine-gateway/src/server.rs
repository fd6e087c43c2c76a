// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Serves the read-only dashboard API. The transport webhook router is
//! merged in by the caller so one listener covers both surfaces.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use vitrine_core::{ChannelAdapter, VitrineError};
use vitrine_storage::ConversationLog;

use crate::handlers;

/// Shared state for the read API handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Conversation log and analytics queries.
    pub log: ConversationLog,
    /// Transport adapter, for status/health reporting only.
    pub channel: Arc<dyn ChannelAdapter>,
}

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// The read API routes (without the transport webhook).
pub fn api_routes(state: GatewayState) -> Router {
    Router::new()
        .route("/contacts", get(handlers::get_contacts))
        .route("/messages", get(handlers::get_messages))
        .route("/schedules", get(handlers::get_schedules))
        .route("/templates", get(handlers::get_templates))
        .route("/stats", get(handlers::get_stats))
        .route("/transport-status", get(handlers::get_transport_status))
        .route("/health", get(handlers::get_health))
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// `extra_routes` is merged into the router (used for the transport
/// webhook). Runs until the listener fails; callers spawn it.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    extra_routes: Router,
) -> Result<(), VitrineError> {
    let app = Router::new()
        .merge(api_routes(state))
        .merge(extra_routes)
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| VitrineError::Transport {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| VitrineError::Transport {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vitrine_storage::Database;
    use vitrine_test_utils::MockChannel;

    #[tokio::test]
    async fn gateway_state_is_clone() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("state.db").to_str().unwrap())
            .await
            .unwrap();
        let state = GatewayState {
            log: ConversationLog::new(db),
            channel: Arc::new(MockChannel::new()),
        };
        let _cloned = state.clone();
    }

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }
}
