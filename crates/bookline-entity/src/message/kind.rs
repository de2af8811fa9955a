//! Message kind as a tagged union.
//!
//! Each variant carries only the fields meaningful to that kind, instead
//! of an open metadata bag where fields exist only sometimes.

use serde::{Deserialize, Serialize};

use crate::booking::BookingStatus;

/// What kind of chat event a message represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MessageKind {
    /// Free-form text typed by a participant.
    Text,
    /// A templated platform message.
    System,
    /// The structured message opening a booking negotiation.
    BookingRequest {
        /// Whether the requested booking is future-dated.
        scheduled: bool,
    },
    /// A booking status transition announcement.
    StatusUpdate {
        /// The status the booking moved to.
        status: BookingStatus,
    },
    /// An automated reply sent on the provider's behalf.
    AutoReply,
    /// A card carrying the provider's bank details for the balance due.
    PaymentCard {
        /// The amount still owed after the deposit.
        amount: i64,
    },
    /// A fallback notice shown when the provider is unavailable.
    Fallback {
        /// Whether the client should render action buttons.
        show_actions: bool,
    },
}

impl MessageKind {
    /// The wire name of the kind tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::System => "system",
            Self::BookingRequest { .. } => "booking-request",
            Self::StatusUpdate { .. } => "status-update",
            Self::AutoReply => "auto-reply",
            Self::PaymentCard { .. } => "payment-card",
            Self::Fallback { .. } => "fallback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tag_on_wire() {
        let json = serde_json::to_value(MessageKind::StatusUpdate {
            status: BookingStatus::Confirmed,
        })
        .unwrap();
        assert_eq!(json["kind"], "status-update");
        assert_eq!(json["status"], "confirmed");
    }
}
