// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation session engine.
//!
//! The [`DialogEngine`] consumes inbound transport events and, per
//! participant, serializes the whole read-route-commit-reply cycle behind a
//! keyed execution lock. Across different participants processing is fully
//! parallel: spawn one task per inbound event.

pub mod replies;
pub mod router;
pub mod rules;
pub mod session;

pub use router::{DialogRouter, RouteOutcome};
pub use session::{ContextPatch, Session, SessionContext, SessionState, SessionStore};

use std::sync::Arc;

use tracing::{debug, error, warn};

use vitrine_core::{ChannelAdapter, InboundMessage, Sender, VitrineError};
use vitrine_storage::ConversationLog;

/// Coordinates session lookup, routing, persistence, and reply delivery for
/// every inbound message.
pub struct DialogEngine {
    sessions: SessionStore,
    router: DialogRouter,
    channel: Arc<dyn ChannelAdapter>,
    log: ConversationLog,
    fallback_name: String,
}

impl DialogEngine {
    pub fn new(
        router: DialogRouter,
        channel: Arc<dyn ChannelAdapter>,
        log: ConversationLog,
        fallback_name: String,
    ) -> Self {
        Self {
            sessions: SessionStore::new(),
            router,
            channel,
            log,
            fallback_name,
        }
    }

    /// The volatile session table.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Processes one inbound message end to end.
    ///
    /// Holds the participant's session lock for the full cycle so no two
    /// concurrent messages from the same participant interleave. Log writes
    /// are swallowed on failure; a failed reply send returns an error and
    /// leaves the session state untouched.
    pub async fn handle_inbound(&self, inbound: InboundMessage) -> Result<(), VitrineError> {
        let entry = self.sessions.entry(&inbound.sender_id);
        let mut session = entry.lock().await;

        if let Err(e) = self
            .log
            .record_message(
                &inbound.sender_id,
                &inbound.body,
                Sender::User,
                inbound.display_name.as_deref(),
            )
            .await
        {
            warn!(error = %e, participant_id = inbound.sender_id.as_str(), "failed to record inbound message");
        }

        let display_name = self.resolve_display_name(&inbound, &session).await;

        debug!(
            participant_id = inbound.sender_id.as_str(),
            state = %session.state,
            "routing inbound message"
        );

        let outcome = match self
            .router
            .route(&inbound.sender_id, &session, &inbound.body, &display_name)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, participant_id = inbound.sender_id.as_str(), "routing failed");
                // Best-effort apology; the original error is what propagates.
                let _ = self
                    .deliver(&inbound.sender_id, &replies::processing_error())
                    .await;
                return Err(e);
            }
        };

        for reply in &outcome.replies {
            self.deliver(&inbound.sender_id, reply).await?;
        }

        session.apply(outcome.next_state, outcome.patch);
        Ok(())
    }

    /// Sends one reply and logs it. A refused or failed send becomes a
    /// [`VitrineError::Transport`]; log failures are swallowed.
    async fn deliver(&self, participant_id: &str, text: &str) -> Result<(), VitrineError> {
        let delivered = self.channel.send(participant_id, text).await?;
        if !delivered {
            return Err(VitrineError::Transport {
                message: format!("transport refused message to {participant_id}"),
                source: None,
            });
        }
        if let Err(e) = self
            .log
            .record_message(participant_id, text, Sender::Bot, None)
            .await
        {
            warn!(error = %e, participant_id, "failed to record outbound message");
        }
        Ok(())
    }

    /// Inbound contact name, then cached session context, then a transport
    /// lookup, then the configured generic label.
    async fn resolve_display_name(&self, inbound: &InboundMessage, session: &Session) -> String {
        if let Some(name) = &inbound.display_name {
            return name.clone();
        }
        if let Some(name) = &session.context.display_name {
            return name.clone();
        }
        match self.channel.display_name(&inbound.sender_id).await {
            Some(name) => name,
            None => self.fallback_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use vitrine_pix::{Merchant, PixEncoder};
    use vitrine_schedule::ScheduleService;
    use vitrine_storage::Database;
    use vitrine_test_utils::{MockChannel, MockResponder};

    struct Harness {
        engine: DialogEngine,
        channel: Arc<MockChannel>,
        responder: Arc<MockResponder>,
        log: ConversationLog,
        _dir: tempfile::TempDir,
    }

    async fn harness_with(responder: MockResponder) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("dialog_test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let log = ConversationLog::new(db.clone());

        let channel = Arc::new(MockChannel::new());
        let responder = Arc::new(responder);
        let router = DialogRouter::new(
            ScheduleService::new(db),
            PixEncoder::new(Merchant {
                name: "Vitor".to_string(),
                city: "Sao Paulo".to_string(),
                key: "16997454758".to_string(),
            }),
            responder.clone(),
            Duration::from_millis(200),
        );
        let engine = DialogEngine::new(
            router,
            channel.clone(),
            log.clone(),
            "Cliente".to_string(),
        );

        Harness {
            engine,
            channel,
            responder,
            log,
            _dir: dir,
        }
    }

    async fn harness() -> Harness {
        harness_with(MockResponder::new()).await
    }

    fn msg(sender_id: &str, body: &str) -> InboundMessage {
        InboundMessage {
            sender_id: sender_id.to_string(),
            body: body.to_string(),
            display_name: Some("Ana".to_string()),
        }
    }

    #[tokio::test]
    async fn quote_request_moves_to_budget_option() {
        let h = harness().await;
        h.engine.handle_inbound(msg("p1", "Orçamento")).await.unwrap();

        let session = h.engine.sessions().get("p1").await;
        assert_eq!(session.state, SessionState::AwaitingBudgetOption);

        // Greeting plus the three-option menu, in order.
        let texts = h.channel.texts_for("p1").await;
        assert_eq!(texts.len(), 2);
        assert!(texts[0].contains("Ana"));
        assert!(texts[1].contains("ESCOLHA UMA OPÇÃO"));
    }

    #[tokio::test]
    async fn greeting_stays_in_menu() {
        let h = harness().await;
        h.engine.handle_inbound(msg("p1", "oi")).await.unwrap();

        assert_eq!(h.engine.sessions().get("p1").await.state, SessionState::Menu);
        let texts = h.channel.texts_for("p1").await;
        assert!(texts[0].contains("Seja bem-vindo"));
    }

    #[tokio::test]
    async fn free_text_goes_to_fallback_responder_verbatim() {
        let h = harness_with(MockResponder::with_replies(vec![
            "resposta gerada".to_string(),
        ]))
        .await;
        h.engine
            .handle_inbound(msg("p1", "Qual o prazo médio?"))
            .await
            .unwrap();

        let calls = h.responder.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "qual o prazo médio?");
        assert_eq!(calls[0].1, "Ana");

        let texts = h.channel.texts_for("p1").await;
        assert_eq!(texts, vec!["resposta gerada"]);
        assert_eq!(h.engine.sessions().get("p1").await.state, SessionState::Menu);
    }

    #[tokio::test]
    async fn responder_failure_substitutes_fixed_reply() {
        let h = harness_with(MockResponder::failing()).await;
        h.engine.handle_inbound(msg("p1", "pergunta livre")).await.unwrap();

        let texts = h.channel.texts_for("p1").await;
        assert!(texts[0].contains("limitações técnicas"));
        assert_eq!(h.engine.sessions().get("p1").await.state, SessionState::Menu);
    }

    #[tokio::test]
    async fn responder_timeout_substitutes_fixed_reply() {
        let h = harness_with(MockResponder::with_delay(Duration::from_secs(5))).await;
        h.engine.handle_inbound(msg("p1", "pergunta lenta")).await.unwrap();

        let texts = h.channel.texts_for("p1").await;
        assert!(texts[0].contains("limitações técnicas"));
    }

    #[tokio::test]
    async fn catalog_then_back_clears_to_menu() {
        let h = harness().await;
        h.engine.handle_inbound(msg("p1", "1")).await.unwrap();
        assert_eq!(
            h.engine.sessions().get("p1").await.state,
            SessionState::AwaitingTemplateSelection
        );

        h.engine.handle_inbound(msg("p1", "voltar")).await.unwrap();
        let session = h.engine.sessions().get("p1").await;
        assert_eq!(session.state, SessionState::Menu);
        assert_eq!(session.context, SessionContext::default());
    }

    #[tokio::test]
    async fn selecting_a_template_stores_it_and_awaits_payment() {
        let h = harness().await;
        h.engine.handle_inbound(msg("p1", "1")).await.unwrap();
        h.engine.handle_inbound(msg("p1", "12")).await.unwrap();

        let session = h.engine.sessions().get("p1").await;
        assert_eq!(session.state, SessionState::AwaitingPaymentDecision);
        assert_eq!(session.context.selected_template, Some(12));

        let texts = h.channel.texts_for("p1").await;
        assert!(texts.last().unwrap().contains("Template 12 - DETALHES"));
    }

    #[tokio::test]
    async fn unknown_template_number_keeps_state() {
        let h = harness().await;
        h.engine.handle_inbound(msg("p1", "1")).await.unwrap();
        h.engine.handle_inbound(msg("p1", "99")).await.unwrap();

        let session = h.engine.sessions().get("p1").await;
        assert_eq!(session.state, SessionState::AwaitingTemplateSelection);
        let texts = h.channel.texts_for("p1").await;
        assert!(texts.last().unwrap().contains("não encontrado"));
    }

    #[tokio::test]
    async fn paying_generates_exactly_one_code_and_clears_context() {
        let h = harness().await;
        h.engine.handle_inbound(msg("p1", "1")).await.unwrap();
        h.engine.handle_inbound(msg("p1", "3")).await.unwrap();
        h.engine.handle_inbound(msg("p1", "1")).await.unwrap();

        let session = h.engine.sessions().get("p1").await;
        assert_eq!(session.state, SessionState::Menu);
        assert_eq!(session.context, SessionContext::default());

        let texts = h.channel.texts_for("p1").await;
        let payloads: Vec<&String> =
            texts.iter().filter(|t| t.contains("000201")).collect();
        assert_eq!(payloads.len(), 1, "exactly one payment code generated");
        // Template 3 costs 200.00 and the code carries that amount.
        assert!(payloads[0].contains("R$ 200.00"));
        assert!(payloads[0].contains("5406200.00"));
    }

    #[tokio::test]
    async fn invalid_payment_option_keeps_selection() {
        let h = harness().await;
        h.engine.handle_inbound(msg("p1", "1")).await.unwrap();
        h.engine.handle_inbound(msg("p1", "5")).await.unwrap();
        h.engine.handle_inbound(msg("p1", "não sei")).await.unwrap();

        let session = h.engine.sessions().get("p1").await;
        assert_eq!(session.state, SessionState::AwaitingPaymentDecision);
        assert_eq!(session.context.selected_template, Some(5));
    }

    #[tokio::test]
    async fn booking_a_slot_persists_and_confirms() {
        let h = harness().await;
        h.engine.handle_inbound(msg("p1", "2")).await.unwrap();
        assert_eq!(
            h.engine.sessions().get("p1").await.state,
            SessionState::AwaitingScheduleSelection
        );

        h.engine.handle_inbound(msg("p1", "4")).await.unwrap();

        let session = h.engine.sessions().get("p1").await;
        assert_eq!(session.state, SessionState::Menu);

        let schedules = h.log.list_schedules().await.unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].phone, "p1");
        assert_eq!(schedules[0].name, "Ana");
        assert_eq!(schedules[0].slot, "16:00");

        let texts = h.channel.texts_for("p1").await;
        assert!(texts.last().unwrap().contains("AGENDAMENTO CONFIRMADO"));
    }

    #[tokio::test]
    async fn out_of_range_slot_keeps_state() {
        let h = harness().await;
        h.engine.handle_inbound(msg("p1", "2")).await.unwrap();
        h.engine.handle_inbound(msg("p1", "12")).await.unwrap();

        assert_eq!(
            h.engine.sessions().get("p1").await.state,
            SessionState::AwaitingScheduleSelection
        );
        assert!(h.log.list_schedules().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_send_leaves_state_untouched() {
        let h = harness().await;
        h.channel.set_failing(true);

        let result = h.engine.handle_inbound(msg("p1", "orçamento")).await;
        assert!(matches!(result, Err(VitrineError::Transport { .. })));
        assert_eq!(h.engine.sessions().get("p1").await.state, SessionState::Menu);
    }

    #[tokio::test]
    async fn both_directions_are_logged() {
        let h = harness().await;
        h.engine.handle_inbound(msg("p1", "oi")).await.unwrap();

        let messages = h.log.list_messages(Some("p1")).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].body, "oi");
        assert_eq!(messages[1].sender, Sender::Bot);
    }

    #[tokio::test]
    async fn display_name_falls_back_to_transport_lookup() {
        let h = harness().await;
        h.channel.set_display_name("p2", "Bruna").await;

        let inbound = InboundMessage {
            sender_id: "p2".to_string(),
            body: "oi".to_string(),
            display_name: None,
        };
        h.engine.handle_inbound(inbound).await.unwrap();

        let texts = h.channel.texts_for("p2").await;
        assert!(texts[0].contains("Bruna"));
    }

    #[tokio::test]
    async fn display_name_falls_back_to_generic_label() {
        let h = harness().await;
        let inbound = InboundMessage {
            sender_id: "p3".to_string(),
            body: "oi".to_string(),
            display_name: None,
        };
        h.engine.handle_inbound(inbound).await.unwrap();

        let texts = h.channel.texts_for("p3").await;
        assert!(texts[0].contains("Cliente"));
    }

    #[tokio::test]
    async fn participants_do_not_share_state() {
        let h = harness().await;
        h.engine.handle_inbound(msg("p1", "1")).await.unwrap();
        h.engine.handle_inbound(msg("p2", "oi")).await.unwrap();

        assert_eq!(
            h.engine.sessions().get("p1").await.state,
            SessionState::AwaitingTemplateSelection
        );
        assert_eq!(h.engine.sessions().get("p2").await.state, SessionState::Menu);
    }
}
