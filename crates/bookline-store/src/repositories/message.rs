//! Message collection repository.

use std::collections::HashMap;
use std::sync::Arc;

use bookline_core::config::StoreConfig;
use bookline_core::result::AppResult;
use bookline_core::traits::DocumentStore;
use bookline_core::types::ConversationId;
use bookline_core::types::document::to_fields;
use bookline_core::types::filter::FilterField;
use bookline_core::types::id::MessageId;
use bookline_entity::message::{Message, MessageInput};

/// Repository for the chat message collection.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
    page_limit: usize,
}

impl MessageRepository {
    /// Create a repository bound to the configured message collection.
    pub fn new(store: Arc<dyn DocumentStore>, config: &StoreConfig) -> Self {
        Self {
            store,
            collection: config.messages_collection.clone(),
            page_limit: config.message_page_limit,
        }
    }

    /// Persist a new message and return the full record.
    pub async fn insert(&self, input: MessageInput) -> AppResult<Message> {
        let message = input.into_message();
        let fields = to_fields(&message)?;
        self.store
            .create(&self.collection, message.id.to_string().as_str(), fields)
            .await?;
        Ok(message)
    }

    /// All messages of a conversation, ascending by send time, bounded to
    /// the most recent page.
    pub async fn list(&self, conversation_id: &ConversationId) -> AppResult<Vec<Message>> {
        let docs = self
            .store
            .query(
                &self.collection,
                &[FilterField::eq("conversation_id", conversation_id.as_str())],
            )
            .await?;

        let mut messages = docs
            .iter()
            .map(|d| d.to_entity::<Message>())
            .collect::<AppResult<Vec<_>>>()?;
        messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));

        // Keep only the newest page, still in ascending order.
        if messages.len() > self.page_limit {
            messages.drain(..messages.len() - self.page_limit);
        }
        Ok(messages)
    }

    /// Flag a message as read by its receiver.
    pub async fn mark_read(&self, id: &MessageId) -> AppResult<()> {
        let mut fields = serde_json::Map::new();
        fields.insert("is_read".into(), serde_json::Value::Bool(true));
        self.store
            .update(&self.collection, id.to_string().as_str(), fields)
            .await?;
        Ok(())
    }

    /// Count of unread messages addressed to `user_id` in a conversation.
    pub async fn unread_count(
        &self,
        conversation_id: &ConversationId,
        user_id: &str,
    ) -> AppResult<usize> {
        let docs = self
            .store
            .query(
                &self.collection,
                &[
                    FilterField::eq("conversation_id", conversation_id.as_str()),
                    FilterField::eq("receiver_id", user_id),
                    FilterField::eq_bool("is_read", false),
                ],
            )
            .await?;
        Ok(docs.len())
    }

    /// The latest message of every conversation the user participates in,
    /// newest conversation first.
    pub async fn conversations_for(&self, user_id: &str) -> AppResult<Vec<Message>> {
        let mut docs = self
            .store
            .query(&self.collection, &[FilterField::eq("sender_id", user_id)])
            .await?;
        docs.extend(
            self.store
                .query(&self.collection, &[FilterField::eq("receiver_id", user_id)])
                .await?,
        );

        let mut latest: HashMap<String, Message> = HashMap::new();
        for doc in &docs {
            let message: Message = doc.to_entity()?;
            let key = message.conversation_id.as_str().to_string();
            match latest.get(&key) {
                Some(existing) if existing.sent_at >= message.sent_at => {}
                _ => {
                    latest.insert(key, message);
                }
            }
        }

        let mut heads: Vec<Message> = latest.into_values().collect();
        heads.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        Ok(heads)
    }
}
