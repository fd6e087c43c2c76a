// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only HTTP API for the dashboard collaborator.
//!
//! Serves contacts, messages, schedules, the template catalog, rollup
//! statistics, and transport status as JSON. The API never writes: the
//! dashboard is an external consumer, and a disconnected transport leaves
//! every endpoint serving.

pub mod handlers;
pub mod server;

pub use server::{api_routes, start_server, GatewayState, ServerConfig};
