// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! High-level conversation log and analytics facade.
//!
//! Wraps the [`Database`] handle and delegates to the typed query modules,
//! stamping wall-clock timestamps so callers never format their own.

use chrono::Utc;
use vitrine_core::{Sender, VitrineError};

use crate::database::Database;
use crate::models::{Contact, MessageRecord, ScheduleRecord, Stats};
use crate::queries;

/// Durable log of all conversation traffic plus derived analytics.
///
/// Cloning shares the underlying database handle.
#[derive(Clone)]
pub struct ConversationLog {
    db: Database,
}

impl ConversationLog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The underlying database handle, for collaborators that persist their
    /// own rows (e.g. the schedule service).
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Appends a message row and upserts the contact.
    ///
    /// `display_name` updates the contact's name when known; `None` leaves
    /// an existing name untouched.
    pub async fn record_message(
        &self,
        participant_id: &str,
        body: &str,
        sender: Sender,
        display_name: Option<&str>,
    ) -> Result<(), VitrineError> {
        let now = Utc::now().to_rfc3339();
        queries::contacts::upsert_contact(&self.db, participant_id, display_name, &now).await?;
        queries::messages::insert_message(&self.db, participant_id, body, sender, &now).await?;
        Ok(())
    }

    /// Contacts sorted by last contact descending, with derived aggregates.
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, VitrineError> {
        queries::contacts::list_contacts(&self.db).await
    }

    /// Messages in chronological order, optionally filtered by participant.
    pub async fn list_messages(
        &self,
        participant_id: Option<&str>,
    ) -> Result<Vec<MessageRecord>, VitrineError> {
        queries::messages::list_messages(&self.db, participant_id).await
    }

    /// Bookings ordered by date descending then slot ascending, status
    /// derived against the current clock.
    pub async fn list_schedules(&self) -> Result<Vec<ScheduleRecord>, VitrineError> {
        queries::schedules::list_schedules(&self.db, Utc::now()).await
    }

    /// Rollup statistics as of the current clock.
    pub async fn stats(&self) -> Result<Stats, VitrineError> {
        queries::stats::stats(&self.db, Utc::now()).await
    }
}
