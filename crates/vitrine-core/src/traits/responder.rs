// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fallback responder trait for the external text-generation collaborator.

use async_trait::async_trait;

use crate::error::VitrineError;

/// Last-resort responder used when no menu rule matches a message.
///
/// Implementations may block on network I/O; the engine bounds each call
/// with a timeout and makes exactly one attempt.
#[async_trait]
pub trait FallbackResponder: Send + Sync {
    /// Produces a free-form reply to `text` addressed to `display_name`.
    async fn respond(&self, text: &str, display_name: &str) -> Result<String, VitrineError>;
}
