// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dialog state machine.
//!
//! Consumes an inbound message plus the participant's current session and
//! produces the ordered reply texts, the next session state, and a context
//! patch. Classification (rules.rs) is separated from execution so every
//! transition in the table below stays individually testable.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use vitrine_catalog as catalog;
use vitrine_core::{FallbackResponder, VitrineError};
use vitrine_pix::PixEncoder;
use vitrine_schedule::{available_slots, ScheduleService};
use vitrine_storage::models::{ScheduleRecord, ScheduleStatus};

use crate::replies;
use crate::rules::{
    self, BudgetIntent, MenuIntent, PaymentIntent, SlotIntent, TemplateIntent,
};
use crate::session::{ContextPatch, Session, SessionState};

/// The routed result of one inbound message.
#[derive(Debug, Default)]
pub struct RouteOutcome {
    /// Reply texts, delivered in order.
    pub replies: Vec<String>,
    /// State overwrite; `None` leaves the state unchanged.
    pub next_state: Option<SessionState>,
    /// Context fields to merge.
    pub patch: ContextPatch,
}

impl RouteOutcome {
    fn reply(text: String) -> Self {
        Self {
            replies: vec![text],
            ..Self::default()
        }
    }

    fn with_state(mut self, state: SessionState) -> Self {
        self.next_state = Some(state);
        self
    }
}

/// Evaluates the per-state rule table and executes the matched action.
pub struct DialogRouter {
    schedule: ScheduleService,
    pix: PixEncoder,
    responder: Arc<dyn FallbackResponder>,
    responder_timeout: Duration,
}

impl DialogRouter {
    pub fn new(
        schedule: ScheduleService,
        pix: PixEncoder,
        responder: Arc<dyn FallbackResponder>,
        responder_timeout: Duration,
    ) -> Self {
        Self {
            schedule,
            pix,
            responder,
            responder_timeout,
        }
    }

    /// Routes one inbound message against the current session.
    ///
    /// Persistence side effects (booking) are committed here, before the
    /// returned replies are handed to the transport.
    pub async fn route(
        &self,
        participant_id: &str,
        session: &Session,
        body: &str,
        display_name: &str,
    ) -> Result<RouteOutcome, VitrineError> {
        let input = rules::normalize(body);
        match session.state {
            SessionState::Menu => self.route_menu(&input, display_name).await,
            SessionState::AwaitingBudgetOption => Ok(route_budget(&input)),
            SessionState::AwaitingTemplateSelection => Ok(route_template_selection(&input)),
            SessionState::AwaitingPaymentDecision => {
                Ok(self.route_payment(&input, session, participant_id))
            }
            SessionState::AwaitingScheduleSelection => {
                Ok(self
                    .route_slot_selection(&input, participant_id, display_name)
                    .await)
            }
        }
    }

    async fn route_menu(
        &self,
        input: &str,
        display_name: &str,
    ) -> Result<RouteOutcome, VitrineError> {
        let patch = ContextPatch::display_name(display_name);
        let outcome = match rules::classify_menu(input) {
            MenuIntent::Quote => RouteOutcome {
                replies: vec![
                    replies::quote_greeting(display_name),
                    replies::quote_options(),
                ],
                next_state: Some(SessionState::AwaitingBudgetOption),
                patch,
            },
            MenuIntent::Catalog => RouteOutcome {
                replies: vec![replies::catalog(catalog::templates())],
                next_state: Some(SessionState::AwaitingTemplateSelection),
                patch,
            },
            MenuIntent::Schedule => RouteOutcome {
                replies: vec![replies::schedule_list(&available_slots())],
                next_state: Some(SessionState::AwaitingScheduleSelection),
                patch,
            },
            MenuIntent::Project => RouteOutcome {
                replies: vec![replies::project_prompt()],
                next_state: Some(SessionState::Menu),
                patch: ContextPatch::default(),
            },
            MenuIntent::Greeting => RouteOutcome {
                replies: vec![replies::welcome(display_name)],
                next_state: None,
                patch,
            },
            MenuIntent::Fallback => {
                let reply = self.fallback_reply(input, display_name).await;
                RouteOutcome {
                    replies: vec![reply],
                    next_state: None,
                    patch,
                }
            }
        };
        Ok(outcome)
    }

    /// One bounded attempt against the external responder; a fixed local
    /// message substitutes on timeout or error.
    async fn fallback_reply(&self, input: &str, display_name: &str) -> String {
        let attempt = tokio::time::timeout(
            self.responder_timeout,
            self.responder.respond(input, display_name),
        )
        .await;

        match attempt {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                warn!(error = %e, "fallback responder failed");
                replies::responder_unavailable(display_name)
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.responder_timeout.as_secs(),
                    "fallback responder timed out"
                );
                replies::responder_unavailable(display_name)
            }
        }
    }

    fn route_payment(
        &self,
        input: &str,
        session: &Session,
        participant_id: &str,
    ) -> RouteOutcome {
        match rules::classify_payment(input) {
            PaymentIntent::Pay => {
                let template = session
                    .context
                    .selected_template
                    .and_then(catalog::find);
                let Some(template) = template else {
                    // Context was lost; recover instead of dead-ending.
                    warn!(participant_id, "payment requested without a selected template");
                    return RouteOutcome::reply(replies::back_to_menu())
                        .with_state(SessionState::Menu);
                };

                let reference = format!("Template {}", template.id);
                let code = self.pix.encode(template.price, &reference);
                info!(
                    participant_id,
                    template_id = template.id,
                    checksum = code.checksum.as_str(),
                    "payment code generated"
                );
                RouteOutcome::reply(replies::pix_message(template, &code))
                    .with_state(SessionState::Menu)
            }
            PaymentIntent::Schedule => {
                RouteOutcome::reply(replies::schedule_list(&available_slots()))
                    .with_state(SessionState::AwaitingScheduleSelection)
            }
            PaymentIntent::Catalog => {
                RouteOutcome::reply(replies::catalog(catalog::templates()))
                    .with_state(SessionState::AwaitingTemplateSelection)
            }
            PaymentIntent::Back => RouteOutcome::reply(replies::back_to_menu())
                .with_state(SessionState::Menu),
            PaymentIntent::Invalid => RouteOutcome::reply(replies::payment_invalid()),
        }
    }

    async fn route_slot_selection(
        &self,
        input: &str,
        participant_id: &str,
        display_name: &str,
    ) -> RouteOutcome {
        let slots = available_slots();
        match rules::classify_slot_selection(input) {
            SlotIntent::Back => RouteOutcome::reply(replies::back_to_menu())
                .with_state(SessionState::Menu),
            SlotIntent::Select(index) if (1..=slots.len()).contains(&index) => {
                let record = match self
                    .schedule
                    .book(participant_id, display_name, index)
                    .await
                {
                    Ok(record) => record,
                    Err(e) => {
                        // Persistence failures never block the reply path.
                        warn!(error = %e, participant_id, "booking persistence failed");
                        unpersisted_booking(participant_id, display_name, index)
                    }
                };
                RouteOutcome::reply(replies::schedule_confirmation(&record))
                    .with_state(SessionState::Menu)
            }
            SlotIntent::Select(_) | SlotIntent::Invalid => {
                RouteOutcome::reply(replies::slot_invalid())
            }
        }
    }
}

fn route_budget(input: &str) -> RouteOutcome {
    match rules::classify_budget(input) {
        BudgetIntent::Catalog => RouteOutcome {
            replies: vec![
                replies::catalog_intro(),
                replies::catalog(catalog::templates()),
            ],
            next_state: Some(SessionState::AwaitingTemplateSelection),
            patch: ContextPatch::default(),
        },
        BudgetIntent::Schedule => RouteOutcome::reply(replies::schedule_list(&available_slots()))
            .with_state(SessionState::AwaitingScheduleSelection),
        BudgetIntent::Project => RouteOutcome::reply(replies::project_prompt_detailed())
            .with_state(SessionState::Menu),
        BudgetIntent::Invalid => RouteOutcome::reply(replies::budget_invalid()),
    }
}

fn route_template_selection(input: &str) -> RouteOutcome {
    match rules::classify_template_selection(input) {
        TemplateIntent::Back => RouteOutcome::reply(replies::back_to_menu())
            .with_state(SessionState::Menu),
        TemplateIntent::Select(id) => match catalog::find(id) {
            Some(template) => RouteOutcome {
                replies: vec![replies::template_details(template)],
                next_state: Some(SessionState::AwaitingPaymentDecision),
                patch: ContextPatch {
                    selected_template: Some(id),
                    ..ContextPatch::default()
                },
            },
            None => RouteOutcome::reply(replies::template_not_found()),
        },
        TemplateIntent::Invalid => RouteOutcome::reply(replies::template_not_found()),
    }
}

/// Confirmation data for a booking whose write was swallowed.
fn unpersisted_booking(
    participant_id: &str,
    display_name: &str,
    index: usize,
) -> ScheduleRecord {
    let slot = available_slots()[index - 1];
    let now = Utc::now();
    ScheduleRecord {
        id: 0,
        phone: participant_id.to_string(),
        name: display_name.to_string(),
        scheduled_for: vitrine_schedule::appointment_instant(slot, now).to_rfc3339(),
        slot: slot.to_string(),
        status: ScheduleStatus::Scheduled,
        created_at: now.to_rfc3339(),
    }
}
