// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vitrine serve` command implementation.
//!
//! Wires storage, the dialog engine, the fallback responder, the bridge
//! transport, and the gateway HTTP server together, then dispatches inbound
//! events until shutdown. One task is spawned per inbound message; the
//! engine's per-participant lock provides the required serialization.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vitrine_config::VitrineConfig;
use vitrine_core::{ChannelAdapter, VitrineError};
use vitrine_dialog::{DialogEngine, DialogRouter};
use vitrine_gateway::{GatewayState, ServerConfig};
use vitrine_pix::{Merchant, PixEncoder};
use vitrine_schedule::ScheduleService;
use vitrine_storage::{ConversationLog, Database};
use vitrine_transport::routes::{routes as transport_routes, TransportState};
use vitrine_transport::BridgeChannel;

/// Runs the `vitrine serve` command until interrupted.
pub async fn run_serve(config: VitrineConfig) -> Result<(), VitrineError> {
    init_tracing(&config.agent.log_level);

    info!("starting vitrine serve");

    // Storage.
    let db = Database::open(&config.storage.database_path).await?;
    let log = ConversationLog::new(db.clone());

    // Transport adapter. A missing bridge URL is not fatal: the engine
    // reports Disconnected while the read API keeps serving.
    let channel: Arc<dyn ChannelAdapter> =
        Arc::new(BridgeChannel::new(config.transport.bridge_url.clone())?);
    if config.transport.bridge_url.is_none() {
        info!("no messaging bridge configured; transport reports disconnected");
    }

    // Fallback responder: external API when a key is set, canned otherwise.
    let responder = vitrine_responder::from_config(&config.responder);

    let router = DialogRouter::new(
        ScheduleService::new(db.clone()),
        PixEncoder::new(Merchant {
            name: config.merchant.name.clone(),
            city: config.merchant.city.clone(),
            key: config.merchant.pix_key.clone(),
        }),
        responder,
        Duration::from_secs(config.responder.timeout_secs),
    );
    let engine = Arc::new(DialogEngine::new(
        router,
        channel.clone(),
        log.clone(),
        config.agent.fallback_name.clone(),
    ));

    // Inbound queue fed by the transport webhook.
    let (inbound_tx, mut inbound_rx) = mpsc::channel(256);

    let cancel = CancellationToken::new();

    // Dispatch loop: one task per inbound event, parallel across
    // participants.
    let dispatch = {
        let engine = engine.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    maybe = inbound_rx.recv() => {
                        let Some(inbound) = maybe else { break };
                        let engine = engine.clone();
                        tokio::spawn(async move {
                            let participant_id = inbound.sender_id.clone();
                            if let Err(e) = engine.handle_inbound(inbound).await {
                                error!(
                                    error = %e,
                                    participant_id = participant_id.as_str(),
                                    "failed to handle inbound message"
                                );
                            }
                        });
                    }
                    _ = cancel.cancelled() => break,
                }
            }
            info!("dispatch loop stopped");
        })
    };

    // Gateway server with the transport webhook merged in.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let gateway_state = GatewayState {
        log: log.clone(),
        channel: channel.clone(),
    };
    let webhook = transport_routes(TransportState { inbound_tx });
    let server = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) =
                vitrine_gateway::start_server(&server_config, gateway_state, webhook).await
            {
                error!(error = %e, "gateway server stopped");
                cancel.cancel();
            }
        })
    };

    // Wait for ctrl-c (or a fatal server error), then drain.
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
        _ = cancel.cancelled() => {}
    }
    cancel.cancel();

    let _ = dispatch.await;
    server.abort();
    db.close().await?;

    info!("vitrine stopped");
    Ok(())
}

/// Initializes the tracing subscriber, honoring `RUST_LOG` over the
/// configured level.
fn init_tracing(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
