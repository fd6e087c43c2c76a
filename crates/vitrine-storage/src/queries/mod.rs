// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per table/concern.

pub mod contacts;
pub mod messages;
pub mod schedules;
pub mod stats;
