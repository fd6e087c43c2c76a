// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP bridge transport adapter.
//!
//! The real messaging backend (WhatsApp Web automation and its QR pairing)
//! runs as an external sidecar. This crate adapts it to the engine's narrow
//! [`ChannelAdapter`] contract: outbound sends and contact lookups go to the
//! bridge over HTTP, inbound events arrive on a webhook route mounted next
//! to the read API. An unconfigured or unreachable bridge degrades to
//! Disconnected without affecting the rest of the process.

pub mod routes;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vitrine_core::{ChannelAdapter, ChannelStatus, VitrineError};

const BRIDGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound half of the bridge protocol.
pub struct BridgeChannel {
    client: reqwest::Client,
    base_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    phone: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    sent: bool,
}

#[derive(Debug, Deserialize)]
struct ContactResponse {
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    connected: bool,
    #[serde(default)]
    identity: Option<String>,
}

impl BridgeChannel {
    /// Builds the adapter. A `None` bridge URL leaves the transport
    /// permanently disconnected; sends fail but nothing crashes.
    pub fn new(bridge_url: Option<String>) -> Result<Self, VitrineError> {
        let client = reqwest::Client::builder()
            .timeout(BRIDGE_TIMEOUT)
            .build()
            .map_err(|e| VitrineError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: bridge_url.map(|u| u.trim_end_matches('/').to_string()),
        })
    }

    fn base_url(&self) -> Result<&str, VitrineError> {
        self.base_url.as_deref().ok_or_else(|| VitrineError::Transport {
            message: "no messaging bridge configured".to_string(),
            source: None,
        })
    }
}

#[async_trait]
impl ChannelAdapter for BridgeChannel {
    async fn send(&self, participant_id: &str, text: &str) -> Result<bool, VitrineError> {
        let base = self.base_url()?;
        let response = self
            .client
            .post(format!("{base}/send"))
            .json(&SendRequest {
                phone: participant_id,
                text,
            })
            .send()
            .await
            .map_err(|e| VitrineError::Transport {
                message: format!("bridge send failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(VitrineError::Transport {
                message: format!("bridge send returned {status}"),
                source: None,
            });
        }

        let body: SendResponse =
            response.json().await.map_err(|e| VitrineError::Transport {
                message: format!("malformed bridge send response: {e}"),
                source: Some(Box::new(e)),
            })?;
        debug!(participant_id, sent = body.sent, "bridge send completed");
        Ok(body.sent)
    }

    async fn display_name(&self, participant_id: &str) -> Option<String> {
        let base = self.base_url.as_deref()?;
        let response = self
            .client
            .get(format!("{base}/contacts/{participant_id}"))
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        response
            .json::<ContactResponse>()
            .await
            .ok()
            .and_then(|c| c.display_name)
    }

    async fn status(&self) -> ChannelStatus {
        let Some(base) = self.base_url.as_deref() else {
            return ChannelStatus::disconnected();
        };
        let response = match self.client.get(format!("{base}/status")).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = %response.status(), "bridge status query failed");
                return ChannelStatus::disconnected();
            }
            Err(e) => {
                warn!(error = %e, "bridge unreachable");
                return ChannelStatus::disconnected();
            }
        };
        match response.json::<StatusResponse>().await {
            Ok(status) => ChannelStatus {
                connected: status.connected,
                identity: status.identity,
            },
            Err(e) => {
                warn!(error = %e, "malformed bridge status response");
                ChannelStatus::disconnected()
            }
        }
    }
}
