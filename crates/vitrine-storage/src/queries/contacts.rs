// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact upsert and aggregate listing.

use rusqlite::params;
use vitrine_core::VitrineError;

use crate::database::Database;
use crate::models::Contact;

/// Insert-or-update a contact.
///
/// Inserting sets `created_at`; updating only refreshes `last_contact_at`.
/// The display name is overwritten only when a non-null `name` is supplied,
/// so a later lookup failure never clobbers a known name.
pub async fn upsert_contact(
    db: &Database,
    phone: &str,
    name: Option<&str>,
    now: &str,
) -> Result<(), VitrineError> {
    let phone = phone.to_string();
    let name = name.map(str::to_string);
    let now = now.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO contacts (phone, name, created_at, last_contact_at)
                 VALUES (?1, COALESCE(?2, 'Cliente'), ?3, ?3)
                 ON CONFLICT (phone) DO UPDATE SET
                     name = COALESCE(?2, contacts.name),
                     last_contact_at = ?3",
                params![phone, name, now],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List contacts sorted by last contact descending, with message aggregates
/// computed over the message log.
pub async fn list_contacts(db: &Database) -> Result<Vec<Contact>, VitrineError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.phone, c.name, c.created_at, c.last_contact_at,
                        COUNT(m.id) AS message_count,
                        MAX(m.created_at) AS last_message_at
                 FROM contacts c
                 LEFT JOIN messages m ON m.phone = c.phone
                 GROUP BY c.phone
                 ORDER BY c.last_contact_at DESC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(Contact {
                    phone: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                    last_contact_at: row.get(3)?,
                    message_count: row.get(4)?,
                    last_message_at: row.get(5)?,
                })
            })?;
            let mut contacts = Vec::new();
            for row in rows {
                contacts.push(row?);
            }
            Ok(contacts)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
