//! Booking entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use bookline_core::types::ConversationId;
use bookline_core::types::id::BookingId;

use super::deposit::Deposit;
use super::status::{BookingStatus, CancelActor};

/// A negotiated service engagement between a requester and a provider.
///
/// The lifecycle state is a tagged union keyed on `status`, so fields like
/// the cancellation reason exist exactly when the state they belong to
/// does. Scheduled bookings carry their deposit inside the schedule
/// variant — an immediate booking structurally cannot have one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// Requester identifier.
    pub requester_id: String,
    /// Requester display name.
    pub requester_name: String,
    /// Provider identifier.
    pub provider_id: String,
    /// Provider display name.
    pub provider_name: String,
    /// What was requested, e.g. "90min deep tissue massage".
    pub service_description: String,
    /// Service duration in minutes.
    pub duration_minutes: u32,
    /// Full agreed price.
    pub price: i64,
    /// Immediate or future-dated, with deposit for the latter.
    pub schedule: Schedule,
    /// Lifecycle state.
    #[serde(flatten)]
    pub state: BookingState,
    /// When the booking was requested.
    pub created_at: DateTime<Utc>,
}

/// When the service is to take place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schedule {
    /// Service starts as soon as the provider accepts.
    Immediate,
    /// Future-dated service; requires an upfront deposit.
    Scheduled {
        /// Agreed service date.
        date: NaiveDate,
        /// Agreed service time.
        time: NaiveTime,
        /// The deposit gating acceptance.
        deposit: Deposit,
    },
}

/// Lifecycle state of a booking, tagged by `status` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BookingState {
    /// Awaiting provider response.
    Pending,
    /// Accepted by the provider.
    Confirmed {
        /// When the provider accepted.
        confirmed_at: DateTime<Utc>,
    },
    /// Service delivered.
    Completed {
        /// When the provider accepted.
        confirmed_at: DateTime<Utc>,
        /// When the service finished.
        completed_at: DateTime<Utc>,
    },
    /// Rejected or cancelled.
    Cancelled {
        /// Who cancelled.
        actor: CancelActor,
        /// Why.
        reason: String,
        /// When.
        cancelled_at: DateTime<Utc>,
        /// Whether the booking had been confirmed before cancellation.
        was_confirmed: bool,
    },
}

impl BookingState {
    /// The flat status discriminant.
    pub fn status(&self) -> BookingStatus {
        match self {
            Self::Pending => BookingStatus::Pending,
            Self::Confirmed { .. } => BookingStatus::Confirmed,
            Self::Completed { .. } => BookingStatus::Completed,
            Self::Cancelled { .. } => BookingStatus::Cancelled,
        }
    }
}

impl Booking {
    /// Create a new pending immediate booking.
    #[allow(clippy::too_many_arguments)]
    pub fn new_immediate(
        requester_id: impl Into<String>,
        requester_name: impl Into<String>,
        provider_id: impl Into<String>,
        provider_name: impl Into<String>,
        service_description: impl Into<String>,
        duration_minutes: u32,
        price: i64,
    ) -> Self {
        Self {
            id: BookingId::new(),
            requester_id: requester_id.into(),
            requester_name: requester_name.into(),
            provider_id: provider_id.into(),
            provider_name: provider_name.into(),
            service_description: service_description.into(),
            duration_minutes,
            price,
            schedule: Schedule::Immediate,
            state: BookingState::Pending,
            created_at: Utc::now(),
        }
    }

    /// Create a new pending scheduled booking with an unpaid deposit.
    #[allow(clippy::too_many_arguments)]
    pub fn new_scheduled(
        requester_id: impl Into<String>,
        requester_name: impl Into<String>,
        provider_id: impl Into<String>,
        provider_name: impl Into<String>,
        service_description: impl Into<String>,
        duration_minutes: u32,
        price: i64,
        date: NaiveDate,
        time: NaiveTime,
        deposit_amount: i64,
    ) -> Self {
        Self {
            schedule: Schedule::Scheduled {
                date,
                time,
                deposit: Deposit::unpaid(deposit_amount),
            },
            ..Self::new_immediate(
                requester_id,
                requester_name,
                provider_id,
                provider_name,
                service_description,
                duration_minutes,
                price,
            )
        }
    }

    /// The flat status discriminant.
    pub fn status(&self) -> BookingStatus {
        self.state.status()
    }

    /// Whether the booking is future-dated.
    pub fn is_scheduled(&self) -> bool {
        matches!(self.schedule, Schedule::Scheduled { .. })
    }

    /// The deposit, if this is a scheduled booking.
    pub fn deposit(&self) -> Option<&Deposit> {
        match &self.schedule {
            Schedule::Scheduled { deposit, .. } => Some(deposit),
            Schedule::Immediate => None,
        }
    }

    /// Mutable access to the deposit, if scheduled.
    pub fn deposit_mut(&mut self) -> Option<&mut Deposit> {
        match &mut self.schedule {
            Schedule::Scheduled { deposit, .. } => Some(deposit),
            Schedule::Immediate => None,
        }
    }

    /// Amount still owed after the deposit (the full price for immediate
    /// bookings).
    pub fn remaining_amount(&self) -> i64 {
        self.price - self.deposit().map(|d| d.amount).unwrap_or(0)
    }

    /// The conversation this booking is negotiated in.
    pub fn conversation_id(&self) -> ConversationId {
        ConversationId::derive(&self.requester_id, &self.provider_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled_booking() -> Booking {
        Booking::new_scheduled(
            "u1",
            "Alice",
            "p1",
            "Bob",
            "90min massage",
            90,
            1_000_000,
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            300_000,
        )
    }

    #[test]
    fn test_status_tag_on_wire() {
        let booking = scheduled_booking();
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["schedule"]["type"], "scheduled");
        assert_eq!(json["schedule"]["deposit"]["amount"], 300_000);
    }

    #[test]
    fn test_serde_roundtrip() {
        let booking = scheduled_booking();
        let json = serde_json::to_value(&booking).unwrap();
        let back: Booking = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, booking.id);
        assert_eq!(back.state, booking.state);
        assert_eq!(back.schedule, booking.schedule);
    }

    #[test]
    fn test_remaining_amount() {
        assert_eq!(scheduled_booking().remaining_amount(), 700_000);
        let immediate =
            Booking::new_immediate("u1", "Alice", "p1", "Bob", "60min massage", 60, 500_000);
        assert_eq!(immediate.remaining_amount(), 500_000);
        assert!(immediate.deposit().is_none());
    }

    #[test]
    fn test_conversation_id() {
        assert_eq!(scheduled_booking().conversation_id().as_str(), "u1_p1");
    }
}
