// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Volatile per-participant session state.
//!
//! One live session per participant, created lazily on first message.
//! Sessions are a process-lifetime cache: the authoritative record of a
//! completed interaction is the persisted message/schedule log, so there is
//! no eviction and no recovery across restarts.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

/// States of the conversation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Top-level menu; free text falls through to the fallback responder.
    #[default]
    Menu,
    /// The three-option quote menu was shown.
    AwaitingBudgetOption,
    /// The catalog was shown; expecting a template number.
    AwaitingTemplateSelection,
    /// Template details were shown; expecting a payment decision.
    AwaitingPaymentDecision,
    /// The slot list was shown; expecting a slot number.
    AwaitingScheduleSelection,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Menu => write!(f, "menu"),
            SessionState::AwaitingBudgetOption => write!(f, "awaiting_budget_option"),
            SessionState::AwaitingTemplateSelection => {
                write!(f, "awaiting_template_selection")
            }
            SessionState::AwaitingPaymentDecision => write!(f, "awaiting_payment_decision"),
            SessionState::AwaitingScheduleSelection => {
                write!(f, "awaiting_schedule_selection")
            }
        }
    }
}

/// Transient key-value data attached to a session.
///
/// Cleared on every transition back into [`SessionState::Menu`]; a selected
/// template is only meaningful while a payment decision is pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub display_name: Option<String>,
    pub selected_template: Option<u32>,
}

/// A field-wise context update. `Some` overwrites, `None` preserves.
#[derive(Debug, Clone, Default)]
pub struct ContextPatch {
    pub display_name: Option<String>,
    pub selected_template: Option<u32>,
}

impl ContextPatch {
    pub fn display_name(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Per-participant conversation state plus accumulated context.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub state: SessionState,
    pub context: SessionContext,
}

impl Session {
    /// Merges a context patch and optionally overwrites the state.
    ///
    /// Entering `Menu` clears the whole context.
    pub fn apply(&mut self, state: Option<SessionState>, patch: ContextPatch) {
        if let Some(name) = patch.display_name {
            self.context.display_name = Some(name);
        }
        if let Some(id) = patch.selected_template {
            self.context.selected_template = Some(id);
        }
        if let Some(next) = state {
            if next == SessionState::Menu {
                self.context = SessionContext::default();
            }
            self.state = next;
        }
    }
}

/// Owned session table keyed by participant id.
///
/// Each entry carries its own mutex: holding an entry's guard serializes all
/// processing for that participant while leaving other participants fully
/// parallel.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, Arc<Mutex<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The per-participant execution lock, creating a fresh Menu-state
    /// session if absent.
    pub fn entry(&self, participant_id: &str) -> Arc<Mutex<Session>> {
        self.sessions
            .entry(participant_id.to_string())
            .or_default()
            .value()
            .clone()
    }

    /// Snapshot of the participant's session (fresh Menu session if absent).
    pub async fn get(&self, participant_id: &str) -> Session {
        let entry = self.entry(participant_id);
        let session = entry.lock().await;
        session.clone()
    }

    /// Merges `patch` into the participant's context and optionally
    /// overwrites the state.
    pub async fn update(
        &self,
        participant_id: &str,
        state: Option<SessionState>,
        patch: ContextPatch,
    ) {
        let entry = self.entry(participant_id);
        let mut session = entry.lock().await;
        session.apply(state, patch);
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
