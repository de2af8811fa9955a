//! Deposit sub-state for scheduled bookings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The deposit attached to a scheduled booking.
///
/// The proof-review loop (reject → reupload → re-review) can iterate
/// arbitrarily many times without ever touching the booking's primary
/// status; only an `Approved` deposit clears the accept gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    /// Deposit amount, a fixed percentage of the booking price.
    pub amount: i64,
    /// Review state of the deposit payment.
    pub state: DepositState,
}

impl Deposit {
    /// A fresh, unpaid deposit of the given amount.
    pub fn unpaid(amount: i64) -> Self {
        Self {
            amount,
            state: DepositState::Unpaid,
        }
    }

    /// Whether a payment proof is currently on file. A rejected proof
    /// does not count; the requester must resubmit.
    pub fn is_paid(&self) -> bool {
        matches!(
            self.state,
            DepositState::PendingApproval { .. } | DepositState::Approved { .. }
        )
    }

    /// Whether the provider has approved the payment proof.
    pub fn is_approved(&self) -> bool {
        matches!(self.state, DepositState::Approved { .. })
    }
}

/// Review state of a deposit payment.
///
/// A status only exists once proof has been submitted; `Unpaid` carries
/// nothing, and each later state carries the proof it was judged on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DepositState {
    /// No payment proof submitted yet.
    Unpaid,
    /// Proof submitted, awaiting provider review.
    PendingApproval {
        /// URL of the uploaded payment proof image.
        proof_url: String,
        /// When the proof was submitted.
        paid_at: DateTime<Utc>,
    },
    /// Proof reviewed and accepted; gate G3 is clear.
    Approved {
        /// URL of the approved payment proof image.
        proof_url: String,
        /// When the proof was approved.
        approved_at: DateTime<Utc>,
    },
    /// Proof reviewed and refused; the requester must resubmit.
    Rejected {
        /// URL of the rejected payment proof image.
        proof_url: String,
        /// Why the proof was refused.
        reason: String,
        /// When the proof was rejected.
        rejected_at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpaid_is_not_approved() {
        let d = Deposit::unpaid(300_000);
        assert!(!d.is_paid());
        assert!(!d.is_approved());
    }

    #[test]
    fn test_rejected_proof_is_not_paid() {
        let d = Deposit {
            amount: 300_000,
            state: DepositState::Rejected {
                proof_url: "https://objects/proof.jpg".into(),
                reason: "unreadable".into(),
                rejected_at: Utc::now(),
            },
        };
        assert!(!d.is_paid());
        assert!(!d.is_approved());
    }

    #[test]
    fn test_status_tag_absent_until_paid() {
        let d = Deposit::unpaid(100);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["state"]["status"], "unpaid");

        let paid = Deposit {
            amount: 100,
            state: DepositState::PendingApproval {
                proof_url: "https://objects/proof.jpg".into(),
                paid_at: Utc::now(),
            },
        };
        let json = serde_json::to_value(&paid).unwrap();
        assert_eq!(json["state"]["status"], "pending_approval");
    }
}
