// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vitrine conversation engine.
//!
//! Provides the foundational trait definitions, error types, and common
//! types used throughout the Vitrine workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VitrineError;
pub use traits::{ChannelAdapter, FallbackResponder};
pub use types::{ChannelStatus, InboundMessage, Sender};
