// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rollup statistics over the conversation log.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use rusqlite::params;
use vitrine_core::{types::reference_timezone, VitrineError};

use crate::database::Database;
use crate::models::Stats;

/// Compute rollup statistics as of `now`.
///
/// "Today" is the calendar day containing `now` in the reference timezone;
/// the 7-day window is a rolling timestamp comparison, not calendar-aligned.
pub async fn stats(db: &Database, now: DateTime<Utc>) -> Result<Stats, VitrineError> {
    let today_threshold = day_start_utc(now);
    let week_threshold = (now - Duration::days(7)).to_rfc3339();

    db.connection()
        .call(move |conn| {
            let total_contacts: i64 =
                conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
            let total_messages: i64 =
                conn.query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
            let total_schedules: i64 =
                conn.query_row("SELECT COUNT(*) FROM schedules", [], |row| row.get(0))?;
            let messages_today: i64 = conn.query_row(
                "SELECT COUNT(*) FROM messages WHERE created_at >= ?1",
                params![today_threshold],
                |row| row.get(0),
            )?;
            let messages_last_7_days: i64 = conn.query_row(
                "SELECT COUNT(*) FROM messages WHERE created_at >= ?1",
                params![week_threshold],
                |row| row.get(0),
            )?;
            Ok(Stats {
                total_contacts,
                total_messages,
                total_schedules,
                messages_today,
                messages_last_7_days,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Midnight of `now`'s calendar day in the reference timezone, rendered as
/// an RFC 3339 UTC string comparable with stored timestamps.
fn day_start_utc(now: DateTime<Utc>) -> String {
    let tz = reference_timezone();
    let local = now.with_timezone(&tz);
    let midnight = local
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(tz)
        .single()
        .expect("fixed offsets have unambiguous local times");
    midnight.with_timezone(&Utc).to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::contacts::upsert_contact;
    use crate::queries::messages::insert_message;
    use crate::queries::schedules::insert_schedule;
    use tempfile::tempdir;
    use vitrine_core::Sender;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("stats_test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn empty_database_yields_zeroes() {
        let (db, _dir) = setup_db().await;
        let s = stats(&db, at("2026-03-10T15:00:00+00:00")).await.unwrap();
        assert_eq!(
            s,
            Stats {
                total_contacts: 0,
                total_messages: 0,
                total_schedules: 0,
                messages_today: 0,
                messages_last_7_days: 0,
            }
        );
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn totals_count_every_row() {
        let (db, _dir) = setup_db().await;
        let now = at("2026-03-10T15:00:00+00:00");

        upsert_contact(&db, "p1", Some("Ana"), "2026-03-10T10:00:00+00:00")
            .await
            .unwrap();
        upsert_contact(&db, "p2", Some("Bia"), "2026-03-10T11:00:00+00:00")
            .await
            .unwrap();
        insert_message(&db, "p1", "a", Sender::User, "2026-03-10T10:00:00+00:00")
            .await
            .unwrap();
        insert_message(&db, "p1", "b", Sender::Bot, "2026-03-10T10:00:01+00:00")
            .await
            .unwrap();
        insert_message(&db, "p2", "c", Sender::User, "2026-03-10T11:00:00+00:00")
            .await
            .unwrap();
        insert_schedule(
            &db,
            "p1",
            "Ana",
            "2026-03-10T18:00:00+00:00",
            "15:00",
            "2026-03-10T10:00:00+00:00",
        )
        .await
        .unwrap();

        let s = stats(&db, now).await.unwrap();
        assert_eq!(s.total_contacts, 2);
        assert_eq!(s.total_messages, 3);
        assert_eq!(s.total_schedules, 1);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn today_boundary_uses_reference_timezone() {
        let (db, _dir) = setup_db().await;
        // 15:00 UTC on March 10 = 12:00 in UTC-3; the local day started at
        // 2026-03-10T03:00:00Z.
        let now = at("2026-03-10T15:00:00+00:00");

        // Exactly at the local midnight boundary: counted.
        insert_message(&db, "p1", "boundary", Sender::User, "2026-03-10T03:00:00+00:00")
            .await
            .unwrap();
        // One second before the boundary: previous local day.
        insert_message(&db, "p1", "yesterday", Sender::User, "2026-03-10T02:59:59+00:00")
            .await
            .unwrap();
        // Plainly today.
        insert_message(&db, "p1", "midday", Sender::User, "2026-03-10T14:00:00+00:00")
            .await
            .unwrap();

        let s = stats(&db, now).await.unwrap();
        assert_eq!(s.messages_today, 2);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn seven_day_window_is_rolling_not_calendar_aligned() {
        let (db, _dir) = setup_db().await;
        let now = at("2026-03-10T15:00:00+00:00");

        // 6 days 23h ago: inside the window.
        insert_message(&db, "p1", "in", Sender::User, "2026-03-03T16:00:00+00:00")
            .await
            .unwrap();
        // 7 days 1h ago: outside.
        insert_message(&db, "p1", "out", Sender::User, "2026-03-03T14:00:00+00:00")
            .await
            .unwrap();

        let s = stats(&db, now).await.unwrap();
        assert_eq!(s.messages_last_7_days, 1);
        assert_eq!(s.total_messages, 2);

        db.close().await.unwrap();
    }
}
