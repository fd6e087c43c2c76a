// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock transport adapter for deterministic testing.
//!
//! `MockChannel` implements `ChannelAdapter` with captured outbound
//! messages, injectable contact names, and a switchable failure mode.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use vitrine_core::{ChannelAdapter, ChannelStatus, VitrineError};

/// A mock messaging transport for testing.
///
/// Messages passed to `send()` are captured and retrievable via
/// `sent_messages()`; contact lookups answer from an injectable name table.
pub struct MockChannel {
    sent: Mutex<Vec<(String, String)>>,
    names: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
    connected: AtomicBool,
}

impl MockChannel {
    /// Create a connected mock channel with empty state.
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            names: Mutex::new(HashMap::new()),
            failing: AtomicBool::new(false),
            connected: AtomicBool::new(true),
        }
    }

    /// Register a display name for a participant.
    pub async fn set_display_name(&self, participant_id: &str, name: &str) {
        self.names
            .lock()
            .await
            .insert(participant_id.to_string(), name.to_string());
    }

    /// When `failing` is set, every `send()` reports non-delivery.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Flip the reported connection status.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// All `(participant_id, text)` pairs sent so far.
    pub async fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }

    /// Texts sent to one participant, in order.
    pub async fn texts_for(&self, participant_id: &str) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(to, _)| to == participant_id)
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Number of messages sent so far.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Clear all captured messages.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelAdapter for MockChannel {
    async fn send(&self, participant_id: &str, text: &str) -> Result<bool, VitrineError> {
        if self.failing.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.sent
            .lock()
            .await
            .push((participant_id.to_string(), text.to_string()));
        Ok(true)
    }

    async fn display_name(&self, participant_id: &str) -> Option<String> {
        self.names.lock().await.get(participant_id).cloned()
    }

    async fn status(&self) -> ChannelStatus {
        if self.connected.load(Ordering::SeqCst) {
            ChannelStatus {
                connected: true,
                identity: Some("mock".to_string()),
            }
        } else {
            ChannelStatus::disconnected()
        }
    }
}
