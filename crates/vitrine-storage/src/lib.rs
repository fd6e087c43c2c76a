// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Vitrine conversation engine.
//!
//! Holds the append-only message log, contact aggregates, and booking
//! records. All writes go through a single tokio-rusqlite background
//! thread; schema management uses embedded refinery migrations.

pub mod database;
pub mod log;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use log::ConversationLog;
pub use models::{Contact, MessageRecord, ScheduleRecord, ScheduleStatus, Stats};
