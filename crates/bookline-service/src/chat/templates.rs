//! Templated bodies for system-generated messages.

use bookline_entity::booking::{Booking, BookingStatus};

/// Body for a status-update message.
pub fn status_update(booking: &Booking, status: BookingStatus, reason: Option<&str>) -> String {
    match status {
        BookingStatus::Pending => format!(
            "Booking request sent: {} ({} min).",
            booking.service_description, booking.duration_minutes
        ),
        BookingStatus::Confirmed => format!(
            "{} accepted the booking: {}.",
            booking.provider_name, booking.service_description
        ),
        BookingStatus::Completed => format!(
            "Booking completed: {}. Thank you!",
            booking.service_description
        ),
        BookingStatus::Cancelled => match reason {
            Some(reason) => format!("Booking cancelled: {reason}"),
            None => "Booking cancelled.".to_string(),
        },
    }
}

/// Body for the booking-request message that opens a negotiation.
pub fn booking_request(booking: &Booking) -> String {
    format!(
        "{} requested {} ({} min) for {}.",
        booking.requester_name, booking.service_description, booking.duration_minutes, booking.price
    )
}

/// Body for the payment card carrying the balance due.
pub fn payment_card(booking: &Booking, amount: i64) -> String {
    format!(
        "Balance due for {}: {amount}. Please transfer to the provider's account.",
        booking.service_description
    )
}

/// Body for the deposit payment card shown when a scheduled booking is
/// created.
pub fn deposit_request(amount: i64) -> String {
    format!("Deposit of {amount} required to secure this scheduled booking.")
}

/// Body for the proof-reupload directive.
pub fn reupload_request(note: &str) -> String {
    format!("Please re-upload your payment proof: {note}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_includes_reason() {
        let booking = Booking::new_immediate("u1", "Alice", "p1", "Bob", "60min", 60, 500_000);
        let body = status_update(&booking, BookingStatus::Cancelled, Some("provider unavailable"));
        assert!(body.contains("provider unavailable"));
    }
}
