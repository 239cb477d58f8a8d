//! End-to-end conversations through the public controller and a scripted transport.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use workact_ai::StaticCompletionClient;
use workact_auth::AllowList;
use workact_bot::messages;
use workact_bot::{run, Controller, FixedClock, IncomingMessage, MemoryTransport, Reply};
use workact_catalog::electrical_works;
use workact_core::{ConversationId, OperatorId};
use workact_infra::{Archiver, HistoryStore, JsonFileHistoryStore, TextFileRenderer};

const CHAT: ConversationId = ConversationId::new(100);
const OPERATOR: OperatorId = OperatorId::new(555);
const STRANGER: OperatorId = OperatorId::new(666);

struct Harness {
    controller: Controller,
    history: Arc<JsonFileHistoryStore>,
    _dir: tempfile::TempDir,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let history = Arc::new(JsonFileHistoryStore::new(dir.path().join("history.json")));
    let archiver = Archiver::new(
        Arc::new(TextFileRenderer::new(dir.path().join("docs"))),
        history.clone(),
    );
    let controller = Controller::new(
        Arc::new(AllowList::new([OPERATOR])),
        Arc::new(electrical_works().unwrap()),
        archiver,
        Arc::new(StaticCompletionClient::answering("Так.")),
    )
    .with_clock(Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())));

    Harness {
        controller,
        history,
        _dir: dir,
    }
}

async fn converse(controller: &Controller, script: Vec<IncomingMessage>) -> Vec<Reply> {
    let mut transport = MemoryTransport::new(script);
    run(controller, &mut transport).await.unwrap();
    transport.take_sent()
}

fn cmd(name: &str) -> IncomingMessage {
    IncomingMessage::command(CHAT, OPERATOR, name, "")
}

fn text(s: &str) -> IncomingMessage {
    IncomingMessage::text(CHAT, OPERATOR, s)
}

fn pick(data: &str) -> IncomingMessage {
    IncomingMessage::callback(CHAT, OPERATOR, data)
}

fn cable_order() -> Vec<IncomingMessage> {
    vec![
        cmd("start"),
        text("Іван Петренко"),
        text("Київ, Хрещатик 1"),
        text("Сьогодні"),
        pick("Прокладка кабелю"),
        text("10"),
        pick("done"),
    ]
}

#[tokio::test]
async fn cable_order_is_priced_archived_and_delivered() {
    let h = harness();
    let replies = converse(&h.controller, cable_order()).await;

    let summary = replies
        .iter()
        .find_map(|r| match r {
            Reply::RemoveKeyboard(text) if text.starts_with("🧾 Акт виконаних робіт") => Some(text),
            _ => None,
        })
        .expect("summary sent");
    assert!(summary.contains("Дата: 05.03.2024"));
    assert!(summary.contains("Прокладка кабелю: 10 × 33 = 330 грн"));
    assert!(summary.contains("Кабель ВВГнг (пог.м): 10.0 м × 35 = 350 грн"));
    assert!(summary.ends_with("🔢 Загалом: 680 грн"));

    let document = match replies.last() {
        Some(Reply::Document(doc)) => doc.clone(),
        other => panic!("expected document last, got {other:?}"),
    };
    assert!(document.path().is_file());

    let records = h.history.load_all().unwrap().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].labor_total, Decimal::from(330));
    assert_eq!(records[0].materials_total, Decimal::from(350));
    assert_eq!(records[0].grand_total, Decimal::from(680));
    assert_eq!(records[0].document, document);
    assert_eq!(h.controller.sessions().active_count(), 0);
}

#[tokio::test]
async fn stranger_is_refused_and_gets_no_session() {
    let h = harness();
    let replies = converse(
        &h.controller,
        vec![
            IncomingMessage::command(CHAT, STRANGER, "start", ""),
            IncomingMessage::command(CHAT, STRANGER, "ask_gpt", "Привіт"),
            IncomingMessage::text(CHAT, STRANGER, "Іван"),
        ],
    )
    .await;

    assert_eq!(
        replies,
        vec![
            Reply::text(messages::ACCESS_DENIED),
            Reply::text(messages::ACCESS_DENIED_SHORT),
        ]
    );
    assert_eq!(h.controller.sessions().active_count(), 0);
}

#[tokio::test]
async fn cancel_mid_dialogue_archives_nothing() {
    let h = harness();
    let replies = converse(
        &h.controller,
        vec![
            cmd("start"),
            text("Іван"),
            text("Київ"),
            text("Сьогодні"),
            pick("Прокладка кабелю"),
            cmd("cancel"),
            pick("done"),
        ],
    )
    .await;

    assert_eq!(
        replies.last(),
        Some(&Reply::RemoveKeyboard(messages::CANCELLED.to_string()))
    );
    assert!(h.history.load_all().unwrap().is_none());
    assert_eq!(h.controller.sessions().active_count(), 0);
}

#[tokio::test]
async fn non_numeric_quantity_is_asked_again() {
    let h = harness();
    let replies = converse(
        &h.controller,
        vec![
            cmd("start"),
            text("Іван"),
            text("Київ"),
            text("Сьогодні"),
            pick("Прокладка кабелю"),
            text("десять"),
            text("-3"),
        ],
    )
    .await;

    let tail = &replies[replies.len() - 2..];
    assert_eq!(
        tail,
        &[
            Reply::text(messages::INVALID_QUANTITY),
            Reply::text(messages::INVALID_QUANTITY),
        ]
    );
    let session = h.controller.sessions().get(CHAT).unwrap();
    assert!(session.draft().unwrap().works.is_empty());
}

#[tokio::test]
async fn history_lists_and_redelivers_documents() {
    let h = harness();
    assert_eq!(
        converse(&h.controller, vec![cmd("history")]).await,
        vec![Reply::text(messages::HISTORY_ABSENT)]
    );

    converse(&h.controller, cable_order()).await;

    let replies = converse(&h.controller, vec![cmd("history"), pick("get_0")]).await;
    match &replies[0] {
        Reply::Options { text, options } => {
            assert!(text.contains("1. 05.03.2024 — Іван Петренко — 680 грн"));
            assert_eq!(options[0].data, "get_0");
        }
        other => panic!("expected history listing, got {other:?}"),
    }
    assert!(matches!(replies[1], Reply::Document(_)));
}

#[tokio::test]
async fn empty_history_file_reports_no_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "[]").unwrap();

    let controller = Controller::new(
        Arc::new(AllowList::new([OPERATOR])),
        Arc::new(electrical_works().unwrap()),
        Archiver::new(
            Arc::new(TextFileRenderer::new(dir.path())),
            Arc::new(JsonFileHistoryStore::new(path)),
        ),
        Arc::new(StaticCompletionClient::answering("")),
    );

    assert_eq!(
        converse(&controller, vec![cmd("history")]).await,
        vec![Reply::text(messages::HISTORY_EMPTY)]
    );
}

#[tokio::test]
async fn removed_document_is_reported_missing() {
    let h = harness();
    let replies = converse(&h.controller, cable_order()).await;
    let Some(Reply::Document(document)) = replies.last() else {
        panic!("expected document");
    };
    std::fs::remove_file(document.path()).unwrap();

    assert_eq!(
        converse(&h.controller, vec![pick("get_0"), pick("get_9")]).await,
        vec![
            Reply::text(messages::DOCUMENT_NOT_FOUND),
            Reply::text(messages::DOCUMENT_NOT_FOUND),
        ]
    );
}

#[tokio::test]
async fn ask_gpt_does_not_touch_the_dialogue() {
    let h = harness();
    let replies = converse(
        &h.controller,
        vec![
            cmd("start"),
            IncomingMessage::command(CHAT, OPERATOR, "ask_gpt", "Чи потрібне УЗО?"),
            text("Іван"),
        ],
    )
    .await;

    assert!(replies.contains(&Reply::text(messages::THINKING)));
    assert!(replies.contains(&Reply::text("Так.")));
    assert_eq!(replies.last(), Some(&Reply::text(messages::ASK_ADDRESS)));
}
