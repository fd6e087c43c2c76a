// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Vitrine workspace.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which side of the conversation authored a message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// An inbound event emitted by the messaging transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Remote participant identifier (the transport's phone/JID-style id).
    pub sender_id: String,
    /// Raw message text as typed by the participant.
    pub body: String,
    /// Display name the transport attached to the event, if any.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Connection status reported by the transport adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStatus {
    /// Whether the transport currently holds an authenticated connection.
    pub connected: bool,
    /// The identity (own number/account) the transport is connected as.
    pub identity: Option<String>,
}

impl ChannelStatus {
    /// A disconnected status with no identity.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            identity: None,
        }
    }
}

/// Fixed reference timezone (UTC-3, São Paulo).
///
/// Calendar-day boundaries for daily statistics and "today at HH:00" slot
/// resolution are computed in this offset. Brazil no longer observes DST,
/// so a fixed offset matches the IANA zone.
pub fn reference_timezone() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).expect("offset within valid range")
}
