//! Subscription entry point over a change feed.

use std::sync::Arc;

use bookline_core::config::StoreConfig;
use bookline_core::traits::ChangeFeed;
use bookline_core::types::ConversationId;
use bookline_core::types::id::BookingId;

use crate::subscription::{BookingSubscription, MessageSubscription};

/// Hands out filtered subscriptions over the collection change channels.
///
/// The bus itself holds no per-subscriber state; dropping a subscription
/// is the only cancellation mechanism.
#[derive(Debug, Clone)]
pub struct RealtimeBus {
    feed: Arc<dyn ChangeFeed>,
    messages_collection: String,
    bookings_collection: String,
}

impl RealtimeBus {
    /// Create a bus over a change feed.
    pub fn new(feed: Arc<dyn ChangeFeed>, config: &StoreConfig) -> Self {
        Self {
            feed,
            messages_collection: config.messages_collection.clone(),
            bookings_collection: config.bookings_collection.clone(),
        }
    }

    /// Subscribe to the messages of one conversation.
    pub fn subscribe(&self, conversation_id: &ConversationId) -> MessageSubscription {
        MessageSubscription::new(
            self.feed.watch(&self.messages_collection),
            conversation_id.clone(),
        )
    }

    /// Subscribe to the state changes of one booking.
    pub fn subscribe_booking(&self, booking_id: &BookingId) -> BookingSubscription {
        BookingSubscription::new(self.feed.watch(&self.bookings_collection), *booking_id)
    }
}
