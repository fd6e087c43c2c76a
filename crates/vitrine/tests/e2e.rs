// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete conversation pipeline.
//!
//! Each test builds an isolated harness with temp SQLite, the mock
//! transport, and the canned responder, then drives full conversations the
//! way the bridge webhook would. Tests are independent and
//! order-insensitive.

use std::sync::Arc;
use std::time::Duration;

use vitrine_core::{InboundMessage, Sender};
use vitrine_dialog::{DialogEngine, DialogRouter, SessionState};
use vitrine_pix::{Merchant, PixEncoder};
use vitrine_schedule::ScheduleService;
use vitrine_storage::{ConversationLog, Database, ScheduleStatus};
use vitrine_test_utils::{MockChannel, MockResponder};

struct Harness {
    engine: Arc<DialogEngine>,
    channel: Arc<MockChannel>,
    log: ConversationLog,
    _dir: tempfile::TempDir,
}

impl Harness {
    async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("e2e.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let log = ConversationLog::new(db.clone());
        let channel = Arc::new(MockChannel::new());

        let router = DialogRouter::new(
            ScheduleService::new(db),
            PixEncoder::new(Merchant {
                name: "Vitor".to_string(),
                city: "Sao Paulo".to_string(),
                key: "16997454758".to_string(),
            }),
            Arc::new(MockResponder::new()),
            Duration::from_millis(500),
        );
        let engine = Arc::new(DialogEngine::new(
            router,
            channel.clone(),
            log.clone(),
            "Cliente".to_string(),
        ));

        Self {
            engine,
            channel,
            log,
            _dir: dir,
        }
    }

    async fn say(&self, participant: &str, name: &str, body: &str) {
        self.engine
            .handle_inbound(InboundMessage {
                sender_id: participant.to_string(),
                body: body.to_string(),
                display_name: Some(name.to_string()),
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn full_purchase_journey_ends_with_a_payment_code() {
    let h = Harness::new().await;

    h.say("5511999990000", "Ana", "orçamento").await;
    h.say("5511999990000", "Ana", "1").await;
    h.say("5511999990000", "Ana", "7").await;
    h.say("5511999990000", "Ana", "pagar").await;

    let texts = h.channel.texts_for("5511999990000").await;
    // Greeting + options, intro + catalog, details, payment code.
    assert_eq!(texts.len(), 6);
    let pix = texts.last().unwrap();
    assert!(pix.contains("PAGAMENTO VIA PIX"));
    assert!(pix.contains("000201"));
    // Template 7 costs 400.00.
    assert!(pix.contains("R$ 400.00"));

    let session = h.engine.sessions().get("5511999990000").await;
    assert_eq!(session.state, SessionState::Menu);
    assert!(session.context.selected_template.is_none());
}

#[tokio::test]
async fn full_booking_journey_persists_the_schedule() {
    let h = Harness::new().await;

    h.say("p1", "Bruna", "atendimento").await;
    h.say("p1", "Bruna", "11").await;

    let schedules = h.log.list_schedules().await.unwrap();
    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].name, "Bruna");
    assert_eq!(schedules[0].slot, "23:00");
    assert_eq!(schedules[0].status, ScheduleStatus::Scheduled);

    let texts = h.channel.texts_for("p1").await;
    assert!(texts.last().unwrap().contains("AGENDAMENTO CONFIRMADO"));
}

#[tokio::test]
async fn every_turn_is_logged_in_both_directions() {
    let h = Harness::new().await;

    h.say("p1", "Ana", "oi").await;
    h.say("p1", "Ana", "orçamento").await;

    let messages = h.log.list_messages(Some("p1")).await.unwrap();
    // oi + welcome, orçamento + greeting + options.
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[0].body, "oi");
    assert_eq!(messages[4].sender, Sender::Bot);

    let stats = h.log.stats().await.unwrap();
    assert_eq!(stats.total_messages, 5);
    assert_eq!(stats.total_contacts, 1);
}

#[tokio::test]
async fn concurrent_participants_never_share_sessions() {
    let h = Harness::new().await;

    // Interleave two conversations through the same engine concurrently.
    let mut handles = Vec::new();
    for (participant, name, script) in [
        ("p1", "Ana", vec!["orçamento", "1", "3"]),
        ("p2", "Bia", vec!["atendimento", "2"]),
    ] {
        let engine = h.engine.clone();
        let script: Vec<String> = script.into_iter().map(String::from).collect();
        handles.push(tokio::spawn(async move {
            for body in script {
                engine
                    .handle_inbound(InboundMessage {
                        sender_id: participant.to_string(),
                        body,
                        display_name: Some(name.to_string()),
                    })
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let p1 = h.engine.sessions().get("p1").await;
    assert_eq!(p1.state, SessionState::AwaitingPaymentDecision);
    assert_eq!(p1.context.selected_template, Some(3));

    let p2 = h.engine.sessions().get("p2").await;
    assert_eq!(p2.state, SessionState::Menu);

    let schedules = h.log.list_schedules().await.unwrap();
    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].phone, "p2");
}

#[tokio::test]
async fn contacts_aggregate_across_participants() {
    let h = Harness::new().await;

    h.say("p1", "Ana", "oi").await;
    h.say("p2", "Bia", "oi").await;

    let contacts = h.log.list_contacts().await.unwrap();
    assert_eq!(contacts.len(), 2);
    // Most recent contact first.
    assert_eq!(contacts[0].phone, "p2");
    assert_eq!(contacts[0].name, "Bia");
    assert_eq!(contacts[0].message_count, 2);
}

#[tokio::test]
async fn harnesses_are_isolated() {
    let h1 = Harness::new().await;
    let h2 = Harness::new().await;

    h1.say("p1", "Ana", "oi").await;

    assert_eq!(h1.log.stats().await.unwrap().total_messages, 2);
    assert_eq!(h2.log.stats().await.unwrap().total_messages, 0);
    assert!(h2.channel.sent_messages().await.is_empty());
}
