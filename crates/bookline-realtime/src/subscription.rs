//! Client-side filtered subscriptions.

use tokio::sync::broadcast;
use tracing::warn;

use bookline_core::events::{ChangeEvent, ChangeKind};
use bookline_core::types::ConversationId;
use bookline_core::types::id::BookingId;
use bookline_entity::booking::Booking;
use bookline_entity::message::Message;

/// A change event carrying a deserialized message.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    /// Whether the message was created or updated (read receipt).
    pub kind: ChangeKind,
    /// The message.
    pub message: Message,
}

/// Live feed of one conversation's messages.
///
/// Events for other conversations on the shared collection channel are
/// filtered out before deserialization is surfaced. Lagged events are
/// dropped with a warning; the conversation history is the source of
/// truth for reconciliation.
#[derive(Debug)]
pub struct MessageSubscription {
    rx: broadcast::Receiver<ChangeEvent>,
    conversation_id: ConversationId,
}

impl MessageSubscription {
    pub(crate) fn new(rx: broadcast::Receiver<ChangeEvent>, conversation_id: ConversationId) -> Self {
        Self { rx, conversation_id }
    }

    /// The next event for this conversation, or `None` once the channel
    /// is closed.
    pub async fn recv(&mut self) -> Option<MessageEvent> {
        loop {
            let event = match self.rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        conversation_id = %self.conversation_id,
                        skipped,
                        "subscription lagged, events dropped"
                    );
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            };

            if event.document.str_field("conversation_id") != Some(self.conversation_id.as_str()) {
                continue;
            }
            match event.document.to_entity::<Message>() {
                Ok(message) => {
                    return Some(MessageEvent {
                        kind: event.kind,
                        message,
                    });
                }
                Err(e) => {
                    warn!(document_id = %event.document.id, error = %e, "undecodable message event");
                }
            }
        }
    }

    /// Drop the subscription.
    pub fn unsubscribe(self) {}
}

/// A change event carrying a deserialized booking.
#[derive(Debug, Clone)]
pub struct BookingEvent {
    /// Whether the booking was created or updated.
    pub kind: ChangeKind,
    /// The booking.
    pub booking: Booking,
}

/// Live feed of one booking's state changes.
#[derive(Debug)]
pub struct BookingSubscription {
    rx: broadcast::Receiver<ChangeEvent>,
    booking_id: BookingId,
}

impl BookingSubscription {
    pub(crate) fn new(rx: broadcast::Receiver<ChangeEvent>, booking_id: BookingId) -> Self {
        Self { rx, booking_id }
    }

    /// The next event for this booking, or `None` once the channel is
    /// closed.
    pub async fn recv(&mut self) -> Option<BookingEvent> {
        loop {
            let event = match self.rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(booking_id = %self.booking_id, skipped, "subscription lagged, events dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            };

            if event.document.id != self.booking_id.to_string() {
                continue;
            }
            match event.document.to_entity::<Booking>() {
                Ok(booking) => {
                    return Some(BookingEvent {
                        kind: event.kind,
                        booking,
                    });
                }
                Err(e) => {
                    warn!(document_id = %event.document.id, error = %e, "undecodable booking event");
                }
            }
        }
    }

    /// Drop the subscription.
    pub fn unsubscribe(self) {}
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bookline_core::config::StoreConfig;
    use bookline_core::traits::DocumentStore;
    use bookline_core::types::document::to_fields;
    use bookline_entity::message::{MessageInput, MessageKind, ParticipantRole};
    use bookline_store::memory::MemoryDocumentStore;

    use crate::RealtimeBus;

    use super::*;

    fn message(sender: &str, receiver: &str, body: &str) -> Message {
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
        .into_message()
    }

    async fn insert(store: &MemoryDocumentStore, config: &StoreConfig, message: &Message) {
        store
            .create(
                &config.messages_collection,
                &message.id.to_string(),
                to_fields(message).unwrap(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_subscription_filters_by_conversation() {
        let store = Arc::new(MemoryDocumentStore::default());
        let config = StoreConfig::default();
        let bus = RealtimeBus::new(store.clone(), &config);

        let mut sub = bus.subscribe(&ConversationId::derive("u1", "p1"));
        insert(&store, &config, &message("u2", "p1", "other conversation")).await;
        insert(&store, &config, &message("u1", "p1", "mine")).await;

        let event = sub.recv().await.unwrap();
        assert_eq!(event.kind, ChangeKind::Created);
        assert_eq!(event.message.body, "mine");
    }

    #[tokio::test]
    async fn test_booking_subscription_follows_one_booking() {
        let store = Arc::new(MemoryDocumentStore::default());
        let config = StoreConfig::default();
        let bus = RealtimeBus::new(store.clone(), &config);

        let booking = Booking::new_immediate("u1", "Alice", "p1", "Bob", "60min", 60, 500_000);
        let other = Booking::new_immediate("u2", "Carol", "p1", "Bob", "90min", 90, 800_000);
        let mut sub = bus.subscribe_booking(&booking.id);

        store
            .create(
                &config.bookings_collection,
                &other.id.to_string(),
                to_fields(&other).unwrap(),
            )
            .await
            .unwrap();
        store
            .create(
                &config.bookings_collection,
                &booking.id.to_string(),
                to_fields(&booking).unwrap(),
            )
            .await
            .unwrap();

        let event = sub.recv().await.unwrap();
        assert_eq!(event.booking.id, booking.id);
    }

    #[tokio::test]
    async fn test_recv_ends_when_channel_closes() {
        let store = Arc::new(MemoryDocumentStore::default());
        let config = StoreConfig::default();
        let mut sub = RealtimeBus::new(store.clone(), &config)
            .subscribe(&ConversationId::derive("u1", "p1"));

        drop(store);
        assert!(sub.recv().await.is_none());
    }
}
