//! Chat service and realtime bus working against the same store.

use std::sync::Arc;

use bookline_core::config::StoreConfig;
use bookline_core::events::ChangeKind;
use bookline_core::types::ConversationId;
use bookline_entity::message::{MessageInput, MessageKind, ParticipantRole};
use bookline_realtime::RealtimeBus;
use bookline_service::ChatService;
use bookline_store::memory::{MemoryDocumentStore, RecordingNotifier};
use bookline_store::repositories::MessageRepository;

fn setup(config: &StoreConfig) -> (Arc<MemoryDocumentStore>, ChatService, RealtimeBus) {
    let store = Arc::new(MemoryDocumentStore::default());
    let chat = ChatService::new(
        Arc::new(MessageRepository::new(store.clone(), config)),
        Arc::new(RecordingNotifier::new()),
    );
    let bus = RealtimeBus::new(store.clone(), config);
    (store, chat, bus)
}

fn input(sender: &str, receiver: &str, body: &str) -> MessageInput {
    MessageInput {
        conversation_id: ConversationId::derive(sender, receiver),
        sender_id: sender.into(),
        sender_name: sender.to_uppercase(),
        sender_role: ParticipantRole::Requester,
        receiver_id: receiver.into(),
        receiver_name: receiver.to_uppercase(),
        receiver_role: ParticipantRole::Provider,
        body: body.into(),
        kind: MessageKind::Text,
        booking_id: None,
    }
}

#[tokio::test]
async fn subscriber_sees_only_its_conversation() {
    let config = StoreConfig::default();
    let (_store, chat, bus) = setup(&config);

    let mut sub = bus.subscribe(&ConversationId::derive("u1", "p1"));
    chat.send(input("u2", "p1", "someone else")).await.unwrap();
    chat.send(input("u1", "p1", "for me")).await.unwrap();

    let event = sub.recv().await.unwrap();
    assert_eq!(event.kind, ChangeKind::Created);
    assert_eq!(event.message.body, "for me");
}

#[tokio::test]
async fn read_receipt_arrives_as_update() {
    let config = StoreConfig::default();
    let (_store, chat, bus) = setup(&config);
    let conv = ConversationId::derive("u1", "p1");

    let sent = chat.send(input("u1", "p1", "hello")).await.unwrap();
    let mut sub = bus.subscribe(&conv);

    chat.mark_read(&sent.id).await.unwrap();
    let event = sub.recv().await.unwrap();
    assert_eq!(event.kind, ChangeKind::Updated);
    assert!(event.message.is_read);

    assert_eq!(chat.unread_count(&conv, "p1").await.unwrap(), 0);
}

#[tokio::test]
async fn history_is_bounded_to_the_newest_page() {
    let config = StoreConfig {
        message_page_limit: 5,
        ..StoreConfig::default()
    };
    let (_store, chat, _bus) = setup(&config);
    let conv = ConversationId::derive("u1", "p1");

    for i in 0..8 {
        chat.send(input("u1", "p1", &format!("msg {i}"))).await.unwrap();
        // Distinct timestamps so the ordering is deterministic.
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let messages = chat.list(&conv).await.unwrap();
    assert_eq!(messages.len(), 5);
    assert_eq!(messages.first().unwrap().body, "msg 3");
    assert_eq!(messages.last().unwrap().body, "msg 7");
}

#[tokio::test]
async fn conversation_list_keeps_latest_head_per_peer() {
    let config = StoreConfig::default();
    let (_store, chat, _bus) = setup(&config);

    chat.send(input("u1", "p1", "to p1")).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    chat.send(input("u1", "p2", "to p2")).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    // The reply stays in the requester-derived conversation.
    chat.send(MessageInput {
        conversation_id: ConversationId::derive("u1", "p1"),
        ..input("p1", "u1", "reply from p1")
    })
    .await
    .unwrap();

    let heads = chat.conversations_for("u1").await.unwrap();
    assert_eq!(heads.len(), 2);
    assert_eq!(heads[0].body, "reply from p1");
    assert_eq!(heads[1].body, "to p2");
}
