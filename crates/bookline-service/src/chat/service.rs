//! Conversation messaging service.

use std::sync::Arc;

use tracing::warn;

use bookline_core::result::AppResult;
use bookline_core::traits::{Notification, Notifier, Recipient};
use bookline_core::types::ConversationId;
use bookline_core::types::id::MessageId;
use bookline_entity::message::{Message, MessageInput, ParticipantRole};
use bookline_store::repositories::MessageRepository;

/// Service for sending and reading conversation messages.
///
/// Persisting a message is the realtime publish: the document store emits
/// a change event for every write, and the realtime bus fans those out to
/// subscribers. The receiver additionally gets a push notification, which
/// is fire-and-forget.
#[derive(Debug, Clone)]
pub struct ChatService {
    messages: Arc<MessageRepository>,
    notifier: Arc<dyn Notifier>,
}

impl ChatService {
    /// Create the chat service.
    pub fn new(messages: Arc<MessageRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self { messages, notifier }
    }

    /// Persist a message and notify its receiver.
    pub async fn send(&self, input: MessageInput) -> AppResult<Message> {
        let message = self.messages.insert(input).await?;
        self.notify_receiver(&message).await;
        Ok(message)
    }

    /// All messages of a conversation, oldest first, bounded to the most
    /// recent page.
    pub async fn list(&self, conversation_id: &ConversationId) -> AppResult<Vec<Message>> {
        self.messages.list(conversation_id).await
    }

    /// Flag a message as read.
    pub async fn mark_read(&self, id: &MessageId) -> AppResult<()> {
        self.messages.mark_read(id).await
    }

    /// Count of messages addressed to `user_id` not yet read.
    pub async fn unread_count(
        &self,
        conversation_id: &ConversationId,
        user_id: &str,
    ) -> AppResult<usize> {
        self.messages.unread_count(conversation_id, user_id).await
    }

    /// The latest message of each conversation the user participates in.
    pub async fn conversations_for(&self, user_id: &str) -> AppResult<Vec<Message>> {
        self.messages.conversations_for(user_id).await
    }

    /// Push a new-message notification to the receiver. Failures are
    /// logged and swallowed; delivery must never fail a send.
    async fn notify_receiver(&self, message: &Message) {
        let recipient = match message.receiver_role {
            ParticipantRole::Provider => Recipient::Provider(message.receiver_id.clone()),
            ParticipantRole::Admin => Recipient::Admin,
            _ => Recipient::Requester(message.receiver_id.clone()),
        };
        let notification = Notification {
            kind: "new_message".into(),
            recipient,
            title: format!("Message from {}", message.sender_name),
            body: message.body.clone(),
            booking_id: message.booking_id,
            urgent: false,
        };
        if let Err(e) = self.notifier.notify(notification).await {
            warn!(message_id = %message.id, error = %e, "message notification failed");
        }
    }
}
