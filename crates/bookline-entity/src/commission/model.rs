//! Commission ledger record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookline_core::types::id::{BookingId, CommissionId};

/// Flat commission status discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionStatus {
    /// Owed to the platform.
    Active,
    /// Reversed after a post-confirmation cancellation.
    Reversed,
}

impl CommissionStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Reversed => "reversed",
        }
    }
}

impl fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ledger state of a commission record, tagged by `status` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CommissionState {
    /// Owed to the platform.
    Active,
    /// Reversed; the reversal stamp exists exactly when the state does.
    Reversed {
        /// When the record was reversed.
        reversed_at: DateTime<Utc>,
        /// Why the record was reversed.
        reversal_reason: String,
    },
}

impl CommissionState {
    /// The flat status discriminant.
    pub fn status(&self) -> CommissionStatus {
        match self {
            Self::Active => CommissionStatus::Active,
            Self::Reversed { .. } => CommissionStatus::Reversed,
        }
    }
}

/// The platform's percentage cut of a completed booking's price.
///
/// At most one active record exists per booking. Created only when a
/// booking completes; reversed only when a booking that had reached
/// confirmed or later is cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRecord {
    /// Unique record identifier.
    pub id: CommissionId,
    /// The booking the commission was earned on.
    pub booking_id: BookingId,
    /// The provider who owes the commission.
    pub provider_id: String,
    /// Commission amount: `round(price * rate)`.
    pub amount: i64,
    /// The rate the amount was computed with, e.g. 0.30.
    pub rate: f64,
    /// Ledger state.
    #[serde(flatten)]
    pub state: CommissionState,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl CommissionRecord {
    /// Create a new active record.
    pub fn new(booking_id: BookingId, provider_id: impl Into<String>, amount: i64, rate: f64) -> Self {
        Self {
            id: CommissionId::new(),
            booking_id,
            provider_id: provider_id.into(),
            amount,
            rate,
            state: CommissionState::Active,
            created_at: Utc::now(),
        }
    }

    /// The flat status discriminant.
    pub fn status(&self) -> CommissionStatus {
        self.state.status()
    }

    /// Whether the record is still owed.
    pub fn is_active(&self) -> bool {
        matches!(self.state, CommissionState::Active)
    }
}
