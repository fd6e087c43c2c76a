// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking persistence and listing with read-time status derivation.

use chrono::{DateTime, Utc};
use rusqlite::params;
use vitrine_core::VitrineError;

use crate::database::Database;
use crate::models::{ScheduleRecord, ScheduleStatus};

/// Persist a confirmed booking. Returns the generated row id.
pub async fn insert_schedule(
    db: &Database,
    phone: &str,
    name: &str,
    scheduled_for: &str,
    slot: &str,
    created_at: &str,
) -> Result<i64, VitrineError> {
    let phone = phone.to_string();
    let name = name.to_string();
    let scheduled_for = scheduled_for.to_string();
    let slot = slot.to_string();
    let created_at = created_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO schedules (phone, name, scheduled_for, slot, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![phone, name, scheduled_for, slot, created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List bookings ordered by date descending then slot ascending.
///
/// `status` is derived from `now`: bookings at or after it are Scheduled,
/// earlier ones Completed. Nothing is stored or updated.
pub async fn list_schedules(
    db: &Database,
    now: DateTime<Utc>,
) -> Result<Vec<ScheduleRecord>, VitrineError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, phone, name, scheduled_for, slot, created_at
                 FROM schedules
                 ORDER BY scheduled_for DESC, slot ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                let scheduled_for: String = row.get(3)?;
                let status = derive_status(&scheduled_for, now).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        3,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                Ok(ScheduleRecord {
                    id: row.get(0)?,
                    phone: row.get(1)?,
                    name: row.get(2)?,
                    scheduled_for,
                    slot: row.get(4)?,
                    status,
                    created_at: row.get(5)?,
                })
            })?;
            let mut schedules = Vec::new();
            for row in rows {
                schedules.push(row?);
            }
            Ok(schedules)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn derive_status(
    scheduled_for: &str,
    now: DateTime<Utc>,
) -> Result<ScheduleStatus, chrono::ParseError> {
    let at = DateTime::parse_from_rfc3339(scheduled_for)?.with_timezone(&Utc);
    Ok(if at >= now {
        ScheduleStatus::Scheduled
    } else {
        ScheduleStatus::Completed
    })
}
