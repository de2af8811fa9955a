//! Notification composition rules — determines who is told what for each
//! booking event.

use bookline_core::traits::{Notification, Recipient};
use bookline_entity::booking::{Booking, BookingStatus, CancelActor};

/// Builds the notifications each booking event produces.
///
/// Pure composition; dispatch lives with the services so failures can be
/// logged and swallowed there.
#[derive(Debug, Clone, Default)]
pub struct NotificationRules;

impl NotificationRules {
    /// Create the rules engine.
    pub fn new() -> Self {
        Self
    }

    /// The provider is told about a new booking request.
    pub fn booking_requested(&self, booking: &Booking) -> Notification {
        Notification {
            kind: "booking_requested".into(),
            recipient: Recipient::Provider(booking.provider_id.clone()),
            title: "New booking request".into(),
            body: format!(
                "{} requested {} ({} min)",
                booking.requester_name, booking.service_description, booking.duration_minutes
            ),
            booking_id: Some(booking.id),
            urgent: false,
        }
    }

    /// The requester is told their booking was accepted.
    pub fn booking_confirmed(&self, booking: &Booking) -> Notification {
        Notification {
            kind: "booking_confirmed".into(),
            recipient: Recipient::Requester(booking.requester_id.clone()),
            title: "Booking confirmed".into(),
            body: format!("{} accepted your booking", booking.provider_name),
            booking_id: Some(booking.id),
            urgent: false,
        }
    }

    /// The requester is told the service was completed.
    pub fn booking_completed(&self, booking: &Booking) -> Notification {
        Notification {
            kind: "booking_completed".into(),
            recipient: Recipient::Requester(booking.requester_id.clone()),
            title: "Booking completed".into(),
            body: format!("{} is complete", booking.service_description),
            booking_id: Some(booking.id),
            urgent: false,
        }
    }

    /// The party who did not cancel is told about the cancellation.
    pub fn booking_cancelled(&self, booking: &Booking, actor: CancelActor, reason: &str) -> Notification {
        let recipient = match actor {
            CancelActor::Requester => Recipient::Provider(booking.provider_id.clone()),
            _ => Recipient::Requester(booking.requester_id.clone()),
        };
        Notification {
            kind: "booking_cancelled".into(),
            recipient,
            title: "Booking cancelled".into(),
            body: format!("Booking cancelled: {reason}"),
            booking_id: Some(booking.id),
            urgent: false,
        }
    }

    /// Notification for a status transition, when one applies.
    pub fn for_status(
        &self,
        booking: &Booking,
        status: BookingStatus,
        actor: Option<CancelActor>,
        reason: Option<&str>,
    ) -> Option<Notification> {
        match status {
            BookingStatus::Pending => Some(self.booking_requested(booking)),
            BookingStatus::Confirmed => Some(self.booking_confirmed(booking)),
            BookingStatus::Completed => Some(self.booking_completed(booking)),
            BookingStatus::Cancelled => actor.map(|actor| {
                self.booking_cancelled(booking, actor, reason.unwrap_or("no reason given"))
            }),
        }
    }

    /// The provider is told a deposit proof awaits review. Urgent because
    /// acceptance is blocked on the review.
    pub fn deposit_submitted(&self, booking: &Booking) -> Notification {
        Notification {
            kind: "deposit_submitted".into(),
            recipient: Recipient::Provider(booking.provider_id.clone()),
            title: "Deposit proof submitted".into(),
            body: format!("{} submitted a deposit payment proof", booking.requester_name),
            booking_id: Some(booking.id),
            urgent: true,
        }
    }

    /// The requester is told their deposit was approved.
    pub fn deposit_approved(&self, booking: &Booking) -> Notification {
        Notification {
            kind: "deposit_approved".into(),
            recipient: Recipient::Requester(booking.requester_id.clone()),
            title: "Deposit approved".into(),
            body: "Your deposit payment was approved".into(),
            booking_id: Some(booking.id),
            urgent: false,
        }
    }

    /// The requester is told their deposit proof was refused.
    pub fn deposit_rejected(&self, booking: &Booking, reason: &str) -> Notification {
        Notification {
            kind: "deposit_rejected".into(),
            recipient: Recipient::Requester(booking.requester_id.clone()),
            title: "Deposit proof rejected".into(),
            body: format!("Your deposit proof was rejected: {reason}"),
            booking_id: Some(booking.id),
            urgent: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> Booking {
        Booking::new_immediate("u1", "Alice", "p1", "Bob", "60min", 60, 500_000)
    }

    #[test]
    fn test_cancellation_notifies_the_other_party() {
        let rules = NotificationRules::new();
        let booking = booking();

        let n = rules.booking_cancelled(&booking, CancelActor::Requester, "sick");
        assert_eq!(n.recipient, Recipient::Provider("p1".into()));

        let n = rules.booking_cancelled(&booking, CancelActor::Provider, "closed");
        assert_eq!(n.recipient, Recipient::Requester("u1".into()));
    }

    #[test]
    fn test_deposit_submission_is_urgent() {
        let rules = NotificationRules::new();
        assert!(rules.deposit_submitted(&booking()).urgent);
    }
}
