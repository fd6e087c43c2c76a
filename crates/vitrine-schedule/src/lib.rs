// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Appointment scheduling: a fixed set of bookable hours plus booking
//! persistence.
//!
//! The slot list is stateless and identical on every call. Booking computes
//! a concrete date (today at the chosen hour, in the reference timezone) and
//! persists it; multiple participants may book the same hour — slots model
//! availability bands, not exclusive capacity.

use chrono::{NaiveTime, Utc};
use tracing::info;
use vitrine_core::{types::reference_timezone, VitrineError};
use vitrine_storage::models::{ScheduleRecord, ScheduleStatus};
use vitrine_storage::{queries, Database};

/// First bookable hour of the day.
const FIRST_HOUR: u32 = 13;
/// Last bookable hour of the day (inclusive).
const LAST_HOUR: u32 = 23;
/// Number of bookable slots.
const SLOT_COUNT: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;

/// A fixed bookable hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    hour: u32,
}

impl TimeSlot {
    pub fn hour(self) -> u32 {
        self.hour
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:00", self.hour)
    }
}

/// The fixed ordered slot sequence: 13:00 through 23:00, 11 entries.
pub fn available_slots() -> [TimeSlot; SLOT_COUNT] {
    let mut slots = [TimeSlot { hour: FIRST_HOUR }; SLOT_COUNT];
    for (i, slot) in slots.iter_mut().enumerate() {
        slot.hour = FIRST_HOUR + i as u32;
    }
    slots
}

/// The concrete appointment instant for `slot` on `now`'s calendar day in
/// the reference timezone.
pub fn appointment_instant(slot: TimeSlot, now: chrono::DateTime<Utc>) -> chrono::DateTime<Utc> {
    let tz = reference_timezone();
    let local_today = now.with_timezone(&tz).date_naive();
    local_today
        .and_time(NaiveTime::from_hms_opt(slot.hour(), 0, 0).expect("slot hours are valid"))
        .and_local_timezone(tz)
        .single()
        .expect("fixed offsets have unambiguous local times")
        .with_timezone(&Utc)
}

/// Booking service bound to the shared database.
#[derive(Clone)]
pub struct ScheduleService {
    db: Database,
}

impl ScheduleService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Books the slot at 1-based `slot_index` for today and persists it.
    ///
    /// The concrete appointment instant is today's date at the slot hour in
    /// the reference timezone, stored as UTC.
    pub async fn book(
        &self,
        participant_id: &str,
        display_name: &str,
        slot_index: usize,
    ) -> Result<ScheduleRecord, VitrineError> {
        let slots = available_slots();
        let slot = slot_index
            .checked_sub(1)
            .and_then(|i| slots.get(i).copied())
            .ok_or_else(|| {
                VitrineError::Internal(format!("slot index {slot_index} out of range"))
            })?;

        let now = Utc::now();
        let scheduled_for = appointment_instant(slot, now).to_rfc3339();
        let created_at = now.to_rfc3339();

        let id = queries::schedules::insert_schedule(
            &self.db,
            participant_id,
            display_name,
            &scheduled_for,
            &slot.to_string(),
            &created_at,
        )
        .await?;

        info!(
            participant_id,
            slot = %slot,
            scheduled_for = scheduled_for.as_str(),
            "booking persisted"
        );

        Ok(ScheduleRecord {
            id,
            phone: participant_id.to_string(),
            name: display_name.to_string(),
            scheduled_for,
            slot: slot.to_string(),
            status: ScheduleStatus::Scheduled,
            created_at,
        })
    }
}
