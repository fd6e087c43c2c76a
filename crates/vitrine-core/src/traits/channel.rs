// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport adapter trait for messaging backends.

use async_trait::async_trait;

use crate::error::VitrineError;
use crate::types::ChannelStatus;

/// Narrow contract the dialog engine holds against the messaging transport.
///
/// Inbound events arrive separately (the transport pushes
/// [`crate::types::InboundMessage`] values into the engine's channel); this
/// trait covers only the outbound and lookup half of the conversation.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Delivers a text message to the participant.
    ///
    /// Returns whether the transport accepted the message for delivery.
    async fn send(&self, participant_id: &str, text: &str) -> Result<bool, VitrineError>;

    /// Looks up the participant's display name, if the transport knows one.
    async fn display_name(&self, participant_id: &str) -> Option<String>;

    /// Current connection status of the transport.
    async fn status(&self) -> ChannelStatus;
}
