// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message log operations.

use rusqlite::params;
use vitrine_core::{Sender, VitrineError};

use crate::database::Database;
use crate::models::MessageRecord;

/// Append a message row. Returns the generated row id.
pub async fn insert_message(
    db: &Database,
    phone: &str,
    body: &str,
    sender: Sender,
    created_at: &str,
) -> Result<i64, VitrineError> {
    let phone = phone.to_string();
    let body = body.to_string();
    let created_at = created_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO messages (phone, body, sender, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![phone, body, sender.to_string(), created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List messages in chronological order, optionally for one participant.
pub async fn list_messages(
    db: &Database,
    phone: Option<&str>,
) -> Result<Vec<MessageRecord>, VitrineError> {
    let phone = phone.map(str::to_string);
    db.connection()
        .call(move |conn| {
            let mut messages = Vec::new();
            match phone {
                Some(phone) => {
                    let mut stmt = conn.prepare(
                        "SELECT id, phone, body, sender, created_at
                         FROM messages WHERE phone = ?1
                         ORDER BY created_at ASC, id ASC",
                    )?;
                    let rows = stmt.query_map(params![phone], row_to_message)?;
                    for row in rows {
                        messages.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT id, phone, body, sender, created_at
                         FROM messages
                         ORDER BY created_at ASC, id ASC",
                    )?;
                    let rows = stmt.query_map([], row_to_message)?;
                    for row in rows {
                        messages.push(row?);
                    }
                }
            }
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<MessageRecord> {
    let sender: String = row.get(3)?;
    let sender = sender.parse::<Sender>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(MessageRecord {
        id: row.get(0)?,
        phone: row.get(1)?,
        body: row.get(2)?,
        sender,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("messages_test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn insert_and_list_in_chronological_order() {
        let (db, _dir) = setup_db().await;

        insert_message(&db, "p1", "oi", Sender::User, "2026-01-01T00:00:01+00:00")
            .await
            .unwrap();
        insert_message(&db, "p1", "olá!", Sender::Bot, "2026-01-01T00:00:02+00:00")
            .await
            .unwrap();
        insert_message(&db, "p1", "orçamento", Sender::User, "2026-01-01T00:00:03+00:00")
            .await
            .unwrap();

        let messages = list_messages(&db, Some("p1")).await.unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].body, "oi");
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[1].sender, Sender::Bot);
        assert_eq!(messages[2].body, "orçamento");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_without_filter_returns_all_participants() {
        let (db, _dir) = setup_db().await;

        insert_message(&db, "p1", "a", Sender::User, "2026-01-01T00:00:01+00:00")
            .await
            .unwrap();
        insert_message(&db, "p2", "b", Sender::User, "2026-01-01T00:00:02+00:00")
            .await
            .unwrap();

        let all = list_messages(&db, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let only_p2 = list_messages(&db, Some("p2")).await.unwrap();
        assert_eq!(only_p2.len(), 1);
        assert_eq!(only_p2[0].phone, "p2");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn equal_timestamps_keep_insertion_order() {
        let (db, _dir) = setup_db().await;

        let ts = "2026-01-01T12:00:00+00:00";
        insert_message(&db, "p1", "first", Sender::User, ts).await.unwrap();
        insert_message(&db, "p1", "second", Sender::Bot, ts).await.unwrap();

        let messages = list_messages(&db, Some("p1")).await.unwrap();
        assert_eq!(messages[0].body, "first");
        assert_eq!(messages[1].body, "second");

        db.close().await.unwrap();
    }
}
