// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! Timestamps are stored and exposed as RFC 3339 UTC strings; aggregates
//! (message counts, last-message timestamps, schedule status) are derived at
//! read time and never stored.

use serde::Serialize;
use vitrine_core::Sender;

/// A single logged conversation message. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    pub id: i64,
    pub phone: String,
    pub body: String,
    pub sender: Sender,
    pub created_at: String,
}

/// A known participant with read-time aggregates over their messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub phone: String,
    pub name: String,
    pub created_at: String,
    pub last_contact_at: String,
    /// Total messages logged for this participant, both directions.
    pub message_count: i64,
    /// Timestamp of the most recent logged message, if any.
    pub last_message_at: Option<String>,
}

/// Whether a booking is still ahead of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Scheduled,
    Completed,
}

/// A confirmed booking. Never mutated; `status` is derived at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRecord {
    pub id: i64,
    pub phone: String,
    pub name: String,
    /// Concrete appointment instant (UTC).
    pub scheduled_for: String,
    /// The chosen slot label, e.g. "19:00".
    pub slot: String,
    pub status: ScheduleStatus,
    pub created_at: String,
}

/// Rollup statistics served to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_contacts: i64,
    pub total_messages: i64,
    pub total_schedules: i64,
    /// Messages since midnight in the reference timezone.
    pub messages_today: i64,
    /// Messages within a rolling 7-day window ending now.
    pub messages_last_7_days: i64,
}
