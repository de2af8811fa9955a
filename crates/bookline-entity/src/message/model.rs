//! Chat message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookline_core::types::ConversationId;
use bookline_core::types::id::{BookingId, MessageId};

use super::kind::MessageKind;
use super::role::ParticipantRole;

/// One chat event in a two-party conversation.
///
/// Messages are immutable once created except for the `is_read` flag, and
/// are never deleted by normal flow. The conversation a message belongs to
/// is derivable from its sender/receiver pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// The conversation this message belongs to.
    pub conversation_id: ConversationId,
    /// Sender identifier.
    pub sender_id: String,
    /// Sender display name.
    pub sender_name: String,
    /// Sender role.
    pub sender_role: ParticipantRole,
    /// Receiver identifier.
    pub receiver_id: String,
    /// Receiver display name.
    pub receiver_name: String,
    /// Receiver role.
    pub receiver_role: ParticipantRole,
    /// Text body (may be system-generated templated text).
    pub body: String,
    /// The kind of chat event, with kind-specific fields.
    #[serde(flatten)]
    pub kind: MessageKind,
    /// The booking this message concerns, if any.
    pub booking_id: Option<BookingId>,
    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
    /// Whether the receiver has read the message.
    pub is_read: bool,
}

impl Message {
    /// Whether the given user is a participant of this message.
    pub fn involves(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }
}

/// Input for creating a new message; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct MessageInput {
    /// The conversation to append to.
    pub conversation_id: ConversationId,
    /// Sender identifier.
    pub sender_id: String,
    /// Sender display name.
    pub sender_name: String,
    /// Sender role.
    pub sender_role: ParticipantRole,
    /// Receiver identifier.
    pub receiver_id: String,
    /// Receiver display name.
    pub receiver_name: String,
    /// Receiver role.
    pub receiver_role: ParticipantRole,
    /// Text body.
    pub body: String,
    /// The kind of chat event.
    pub kind: MessageKind,
    /// The booking this message concerns, if any.
    pub booking_id: Option<BookingId>,
}

impl MessageInput {
    /// Materialize the input into a full message record.
    pub fn into_message(self) -> Message {
        Message {
            id: MessageId::new(),
            conversation_id: self.conversation_id,
            sender_id: self.sender_id,
            sender_name: self.sender_name,
            sender_role: self.sender_role,
            receiver_id: self.receiver_id,
            receiver_name: self.receiver_name,
            receiver_role: self.receiver_role,
            body: self.body,
            kind: self.kind,
            booking_id: self.booking_id,
            sent_at: Utc::now(),
            is_read: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serde_roundtrip() {
        let msg = MessageInput {
            conversation_id: ConversationId::derive("u1", "p1"),
            sender_id: "u1".into(),
            sender_name: "Alice".into(),
            sender_role: ParticipantRole::Requester,
            receiver_id: "p1".into(),
            receiver_name: "Bob".into(),
            receiver_role: ParticipantRole::Provider,
            body: "hello".into(),
            kind: MessageKind::BookingRequest { scheduled: true },
            booking_id: Some(BookingId::new()),
        }
        .into_message();

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["kind"], "booking-request");
        assert_eq!(json["scheduled"], true);

        let back: Message = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, msg.id);
        assert_eq!(back.kind, msg.kind);
    }
}
