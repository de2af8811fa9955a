//! Push notification dispatch trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::id::BookingId;

/// Who a notification is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "role", content = "id")]
pub enum Recipient {
    /// The booking requester.
    Requester(String),
    /// The service provider.
    Provider(String),
    /// Platform operators.
    Admin,
}

/// A notification to be delivered out-of-band (push, dashboard badge).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Event kind, e.g. `booking_requested`, `deposit_paid`.
    pub kind: String,
    /// The recipient.
    pub recipient: Recipient,
    /// Short title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// The booking this notification concerns, if any.
    pub booking_id: Option<BookingId>,
    /// Whether the delivery should be flagged urgent.
    pub urgent: bool,
}

/// Trait for the push-notification delivery collaborator.
///
/// Fire-and-forget from the caller's perspective: dispatch failures are
/// logged and swallowed by the service layer and must never roll back the
/// triggering transition or message send.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver a notification.
    async fn notify(&self, notification: Notification) -> AppResult<()>;
}
