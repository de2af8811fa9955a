//! Pure booking lifecycle decisions.
//!
//! Transition functions take the current booking plus the gate inputs and
//! return either a [`Decision`] (the next state and the side effects the
//! caller must apply) or a [`TransitionError`]. Nothing here touches a
//! store, a clock, or a channel; the service layer owns all effects.

use chrono::{DateTime, Utc};
use thiserror::Error;

use bookline_core::config::BookingConfig;
use bookline_entity::booking::{Booking, BookingState, BookingStatus, CancelActor};
use bookline_entity::payment::ProviderPaymentProfile;

/// Why an accept attempt was turned away at the gate.
///
/// Gate rejections are expected domain outcomes, not failures; callers
/// surface them to the provider so the blocking condition can be fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardRejection {
    /// The provider's bank details are incomplete (gate G1).
    BankDetailsIncomplete {
        /// The field names still missing.
        missing: Vec<&'static str>,
    },
    /// No deposit payment proof is on file (gate G2).
    DepositUnpaid,
    /// Proof is on file but not yet approved (gate G3).
    DepositNotYetApproved,
}

/// A transition request that could not produce a new state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// An accept gate rejected the transition.
    #[error("accept gate rejected: {0:?}")]
    Guard(GuardRejection),
    /// The requested action is not legal from the current status.
    #[error("cannot {action} a {from} booking")]
    InvalidTransition {
        /// The status the booking was in.
        from: BookingStatus,
        /// The attempted action.
        action: &'static str,
    },
}

/// A side effect the caller must apply after persisting the new state.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Post a status-update system message into the conversation.
    StatusMessage {
        /// The status the booking moved to.
        status: BookingStatus,
        /// Cancellation or rejection reason, when there is one.
        reason: Option<String>,
    },
    /// Post a payment card for the balance still owed.
    PaymentCard {
        /// The remaining amount.
        amount: i64,
    },
    /// Create the platform commission record.
    CreateCommission,
    /// Reverse the booking's active commission record.
    ReverseCommission {
        /// Why the commission is reversed.
        reason: String,
    },
}

/// The outcome of a successful transition decision.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// The state to persist.
    pub new_state: BookingState,
    /// The effects to apply after the state is persisted.
    pub effects: Vec<Effect>,
}

/// Decide an accept (pending → confirmed).
///
/// For scheduled bookings the gates are checked in a fixed order: bank
/// details first, then deposit paid, then deposit approved. Immediate
/// bookings skip all gates.
pub fn accept(
    booking: &Booking,
    profile: &ProviderPaymentProfile,
    config: &BookingConfig,
    now: DateTime<Utc>,
) -> Result<Decision, TransitionError> {
    if booking.status() != BookingStatus::Pending {
        return Err(TransitionError::InvalidTransition {
            from: booking.status(),
            action: "accept",
        });
    }

    if booking.is_scheduled() {
        if config.bank_details_required_for_scheduled_bookings {
            let missing = profile.missing_fields(&config.required_bank_fields);
            if !missing.is_empty() {
                return Err(TransitionError::Guard(
                    GuardRejection::BankDetailsIncomplete { missing },
                ));
            }
        }
        // deposit() is always Some for scheduled bookings.
        if let Some(deposit) = booking.deposit() {
            if !deposit.is_paid() {
                return Err(TransitionError::Guard(GuardRejection::DepositUnpaid));
            }
            if !deposit.is_approved() {
                return Err(TransitionError::Guard(GuardRejection::DepositNotYetApproved));
            }
        }
    }

    let mut effects = vec![Effect::StatusMessage {
        status: BookingStatus::Confirmed,
        reason: None,
    }];
    if booking.is_scheduled() {
        effects.push(Effect::PaymentCard {
            amount: booking.remaining_amount(),
        });
    }

    Ok(Decision {
        new_state: BookingState::Confirmed { confirmed_at: now },
        effects,
    })
}

/// Decide a provider rejection (pending → cancelled).
pub fn reject(
    booking: &Booking,
    reason: impl Into<String>,
    now: DateTime<Utc>,
) -> Result<Decision, TransitionError> {
    if booking.status() != BookingStatus::Pending {
        return Err(TransitionError::InvalidTransition {
            from: booking.status(),
            action: "reject",
        });
    }

    let reason = reason.into();
    Ok(Decision {
        new_state: BookingState::Cancelled {
            actor: CancelActor::Provider,
            reason: reason.clone(),
            cancelled_at: now,
            was_confirmed: false,
        },
        effects: vec![Effect::StatusMessage {
            status: BookingStatus::Cancelled,
            reason: Some(reason),
        }],
    })
}

/// Decide a completion (confirmed → completed).
pub fn complete(booking: &Booking, now: DateTime<Utc>) -> Result<Decision, TransitionError> {
    let BookingState::Confirmed { confirmed_at } = booking.state else {
        return Err(TransitionError::InvalidTransition {
            from: booking.status(),
            action: "complete",
        });
    };

    Ok(Decision {
        new_state: BookingState::Completed {
            confirmed_at,
            completed_at: now,
        },
        effects: vec![
            Effect::CreateCommission,
            Effect::StatusMessage {
                status: BookingStatus::Completed,
                reason: None,
            },
        ],
    })
}

/// Decide a cancellation (pending or confirmed → cancelled).
///
/// When the booking had already been confirmed, the decision includes a
/// commission reversal effect; cancellation never creates a record.
pub fn cancel(
    booking: &Booking,
    actor: CancelActor,
    reason: impl Into<String>,
    now: DateTime<Utc>,
) -> Result<Decision, TransitionError> {
    let was_confirmed = match booking.state {
        BookingState::Pending => false,
        BookingState::Confirmed { .. } => true,
        _ => {
            return Err(TransitionError::InvalidTransition {
                from: booking.status(),
                action: "cancel",
            });
        }
    };

    let reason = reason.into();
    let mut effects = vec![Effect::StatusMessage {
        status: BookingStatus::Cancelled,
        reason: Some(reason.clone()),
    }];
    if was_confirmed {
        effects.push(Effect::ReverseCommission {
            reason: reason.clone(),
        });
    }

    Ok(Decision {
        new_state: BookingState::Cancelled {
            actor,
            reason,
            cancelled_at: now,
            was_confirmed,
        },
        effects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookline_entity::booking::{DepositState, Schedule};
    use chrono::{NaiveDate, NaiveTime};

    fn config() -> BookingConfig {
        BookingConfig::default()
    }

    fn complete_profile() -> ProviderPaymentProfile {
        ProviderPaymentProfile {
            bank_name: "Vietcombank".into(),
            account_holder_name: "Bob Tran".into(),
            account_number: "00123456789".into(),
        }
    }

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

    fn approve_deposit(booking: &mut Booking) {
        if let Some(deposit) = booking.deposit_mut() {
            deposit.state = DepositState::Approved {
                proof_url: "memory://proofs/1/proof.jpg".into(),
                approved_at: Utc::now(),
            };
        }
    }

    #[test]
    fn test_immediate_accept_skips_gates() {
        let booking = Booking::new_immediate("u1", "Alice", "p1", "Bob", "60min", 60, 500_000);
        let empty_profile = ProviderPaymentProfile::default();

        let decision = accept(&booking, &empty_profile, &config(), Utc::now()).unwrap();
        assert!(matches!(decision.new_state, BookingState::Confirmed { .. }));
        assert_eq!(decision.effects.len(), 1);
    }

    #[test]
    fn test_gate_order_bank_details_first() {
        let booking = scheduled_booking();
        // Both bank details and deposit are missing; G1 must fire first.
        let err = accept(&booking, &ProviderPaymentProfile::default(), &config(), Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            TransitionError::Guard(GuardRejection::BankDetailsIncomplete { .. })
        ));
    }

    #[test]
    fn test_gate_deposit_unpaid_then_unapproved() {
        let mut booking = scheduled_booking();
        let err = accept(&booking, &complete_profile(), &config(), Utc::now()).unwrap_err();
        assert_eq!(err, TransitionError::Guard(GuardRejection::DepositUnpaid));

        if let Some(deposit) = booking.deposit_mut() {
            deposit.state = DepositState::PendingApproval {
                proof_url: "memory://proofs/1/proof.jpg".into(),
                paid_at: Utc::now(),
            };
        }
        let err = accept(&booking, &complete_profile(), &config(), Utc::now()).unwrap_err();
        assert_eq!(
            err,
            TransitionError::Guard(GuardRejection::DepositNotYetApproved)
        );
    }

    #[test]
    fn test_scheduled_accept_posts_payment_card_for_balance() {
        let mut booking = scheduled_booking();
        approve_deposit(&mut booking);

        let decision = accept(&booking, &complete_profile(), &config(), Utc::now()).unwrap();
        assert!(decision
            .effects
            .contains(&Effect::PaymentCard { amount: 700_000 }));
    }

    #[test]
    fn test_complete_creates_commission() {
        let mut booking = Booking::new_immediate("u1", "Alice", "p1", "Bob", "60min", 60, 500_000);
        booking.state = BookingState::Confirmed { confirmed_at: Utc::now() };

        let decision = complete(&booking, Utc::now()).unwrap();
        assert!(decision.effects.contains(&Effect::CreateCommission));
    }

    #[test]
    fn test_cancel_after_confirmation_reverses_commission() {
        let mut booking = Booking::new_immediate("u1", "Alice", "p1", "Bob", "60min", 60, 500_000);
        booking.state = BookingState::Confirmed { confirmed_at: Utc::now() };

        let decision =
            cancel(&booking, CancelActor::Requester, "no longer needed", Utc::now()).unwrap();
        assert!(matches!(
            decision.new_state,
            BookingState::Cancelled { was_confirmed: true, .. }
        ));
        assert!(decision
            .effects
            .iter()
            .any(|e| matches!(e, Effect::ReverseCommission { .. })));
    }

    #[test]
    fn test_cancel_while_pending_has_no_commission_effect() {
        let booking = Booking::new_immediate("u1", "Alice", "p1", "Bob", "60min", 60, 500_000);
        let decision =
            cancel(&booking, CancelActor::Requester, "changed plans", Utc::now()).unwrap();
        assert!(!decision
            .effects
            .iter()
            .any(|e| matches!(e, Effect::ReverseCommission { .. })));
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut booking = Booking::new_immediate("u1", "Alice", "p1", "Bob", "60min", 60, 500_000);
        booking.state = BookingState::Cancelled {
            actor: CancelActor::Requester,
            reason: "late".into(),
            cancelled_at: Utc::now(),
            was_confirmed: false,
        };

        let profile = complete_profile();
        assert!(matches!(
            accept(&booking, &profile, &config(), Utc::now()),
            Err(TransitionError::InvalidTransition { action: "accept", .. })
        ));
        assert!(matches!(
            complete(&booking, Utc::now()),
            Err(TransitionError::InvalidTransition { action: "complete", .. })
        ));
        assert!(matches!(
            cancel(&booking, CancelActor::Admin, "again", Utc::now()),
            Err(TransitionError::InvalidTransition { action: "cancel", .. })
        ));
    }

    #[test]
    fn test_double_accept_rejected() {
        let mut booking = scheduled_booking();
        approve_deposit(&mut booking);

        let decision = accept(&booking, &complete_profile(), &config(), Utc::now()).unwrap();
        booking.state = decision.new_state;

        assert!(matches!(
            accept(&booking, &complete_profile(), &config(), Utc::now()),
            Err(TransitionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_rejected_proof_blocks_at_unpaid_gate() {
        let mut booking = scheduled_booking();
        if let Some(deposit) = booking.deposit_mut() {
            deposit.state = DepositState::Rejected {
                proof_url: "memory://proofs/1/proof.jpg".into(),
                reason: "unreadable".into(),
                rejected_at: Utc::now(),
            };
        }
        let err = accept(&booking, &complete_profile(), &config(), Utc::now()).unwrap_err();
        assert_eq!(err, TransitionError::Guard(GuardRejection::DepositUnpaid));
    }

    #[test]
    fn test_schedule_untouched_by_transitions() {
        let mut booking = scheduled_booking();
        approve_deposit(&mut booking);
        let before = booking.schedule.clone();

        let decision = accept(&booking, &complete_profile(), &config(), Utc::now()).unwrap();
        booking.state = decision.new_state;
        assert_eq!(booking.schedule, before);
        assert!(matches!(booking.schedule, Schedule::Scheduled { ref deposit, .. }
            if deposit.amount == 300_000));
    }
}
