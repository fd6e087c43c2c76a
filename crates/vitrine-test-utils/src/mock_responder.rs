// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock fallback responder with scripted replies, optional latency, and a
//! failure mode, plus a record of every call for assertions.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use vitrine_core::{FallbackResponder, VitrineError};

/// A scripted fallback responder for tests.
pub struct MockResponder {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, String)>>,
    delay: Option<Duration>,
    failing: bool,
}

impl MockResponder {
    /// Responder that answers every call with "mock response".
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            delay: None,
            failing: false,
        }
    }

    /// Responder that pops the given replies in order, then falls back to
    /// the default.
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::new()
        }
    }

    /// Responder that fails every call.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// Responder that sleeps before answering (for timeout tests).
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    /// All `(text, display_name)` argument pairs seen so far.
    pub async fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().await.clone()
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FallbackResponder for MockResponder {
    async fn respond(&self, text: &str, display_name: &str) -> Result<String, VitrineError> {
        self.calls
            .lock()
            .await
            .push((text.to_string(), display_name.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(VitrineError::Responder {
                message: "mock responder failure".to_string(),
                source: None,
            });
        }
        Ok(self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string()))
    }
}
