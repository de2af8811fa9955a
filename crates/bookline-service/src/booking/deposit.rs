//! Deposit payment review workflow.
//!
//! Runs the proof loop for scheduled bookings: submit → pending approval
//! → approved or rejected, with rejection sending the requester back to
//! resubmission. The loop never touches the booking's primary status;
//! only an approved deposit clears the accept gate.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};

use bookline_core::config::StoreConfig;
use bookline_core::error::AppError;
use bookline_core::result::AppResult;
use bookline_core::traits::{Notification, Notifier, ObjectStorage};
use bookline_core::types::id::BookingId;
use bookline_entity::booking::{Booking, Deposit, DepositState};
use bookline_entity::message::{MessageInput, MessageKind, ParticipantRole};
use bookline_store::repositories::BookingRepository;
use bookline_store::Versioned;

use crate::chat::{templates, ChatService};
use crate::notification::NotificationRules;

/// Service running the deposit proof review loop.
#[derive(Debug, Clone)]
pub struct DepositWorkflow {
    bookings: Arc<BookingRepository>,
    chat: Arc<ChatService>,
    storage: Arc<dyn ObjectStorage>,
    notifier: Arc<dyn Notifier>,
    rules: NotificationRules,
    bucket: String,
}

impl DepositWorkflow {
    /// Create the workflow service.
    pub fn new(
        bookings: Arc<BookingRepository>,
        chat: Arc<ChatService>,
        storage: Arc<dyn ObjectStorage>,
        notifier: Arc<dyn Notifier>,
        config: &StoreConfig,
    ) -> Self {
        Self {
            bookings,
            chat,
            storage,
            notifier,
            rules: NotificationRules::new(),
            bucket: config.payment_proof_bucket.clone(),
        }
    }

    /// Upload a payment proof and move the deposit to pending approval.
    ///
    /// Accepted from `Unpaid` and from `Rejected` (resubmission). The
    /// provider is notified that a proof awaits review.
    pub async fn submit_proof(
        &self,
        booking_id: &BookingId,
        file_name: &str,
        data: Bytes,
    ) -> AppResult<Booking> {
        let stored = self.load(booking_id).await?;
        let deposit = Self::deposit_of(&stored.entity)?;
        match deposit.state {
            DepositState::Unpaid | DepositState::Rejected { .. } => {}
            DepositState::PendingApproval { .. } => {
                return Err(AppError::conflict("Deposit proof is already under review"));
            }
            DepositState::Approved { .. } => {
                return Err(AppError::conflict("Deposit is already approved"));
            }
        }

        let object = self.storage.upload(&self.bucket, file_name, data).await?;
        let booking = self
            .set_deposit_state(
                stored,
                DepositState::PendingApproval {
                    proof_url: object.url,
                    paid_at: Utc::now(),
                },
            )
            .await?;

        self.dispatch(self.rules.deposit_submitted(&booking)).await;
        info!(booking_id = %booking.id, "deposit proof submitted");
        Ok(booking)
    }

    /// Approve the pending proof, clearing the last accept gate.
    ///
    /// Approval only clears the gate; the booking stays pending until the
    /// provider accepts it.
    pub async fn approve(&self, booking_id: &BookingId) -> AppResult<Booking> {
        let stored = self.load(booking_id).await?;
        let deposit = Self::deposit_of(&stored.entity)?;
        let DepositState::PendingApproval { proof_url, .. } = deposit.state.clone() else {
            return Err(AppError::conflict("No deposit proof awaiting review"));
        };

        let booking = self
            .set_deposit_state(
                stored,
                DepositState::Approved {
                    proof_url,
                    approved_at: Utc::now(),
                },
            )
            .await?;

        self.dispatch(self.rules.deposit_approved(&booking)).await;
        info!(booking_id = %booking.id, "deposit approved");
        Ok(booking)
    }

    /// Refuse the pending proof; the requester must resubmit.
    pub async fn reject(&self, booking_id: &BookingId, reason: &str) -> AppResult<Booking> {
        let stored = self.load(booking_id).await?;
        let deposit = Self::deposit_of(&stored.entity)?;
        let DepositState::PendingApproval { proof_url, .. } = deposit.state.clone() else {
            return Err(AppError::conflict("No deposit proof awaiting review"));
        };

        let booking = self
            .set_deposit_state(
                stored,
                DepositState::Rejected {
                    proof_url,
                    reason: reason.to_string(),
                    rejected_at: Utc::now(),
                },
            )
            .await?;

        self.dispatch(self.rules.deposit_rejected(&booking, reason)).await;
        info!(booking_id = %booking.id, reason, "deposit proof rejected");
        Ok(booking)
    }

    /// Ask the requester to upload a fresh proof without changing the
    /// deposit state. Message effect only.
    ///
    /// Only meaningful while a proof is under review or was refused; an
    /// approved deposit no longer accepts review directives.
    pub async fn request_reupload(&self, booking_id: &BookingId, note: &str) -> AppResult<()> {
        let stored = self.load(booking_id).await?;
        let deposit = Self::deposit_of(&stored.entity)?;
        match deposit.state {
            DepositState::PendingApproval { .. } | DepositState::Rejected { .. } => {}
            DepositState::Unpaid => {
                return Err(AppError::conflict("No deposit proof to re-upload"));
            }
            DepositState::Approved { .. } => {
                return Err(AppError::conflict("Deposit is already approved"));
            }
        }
        let booking = stored.entity;

        self.chat
            .send(MessageInput {
                conversation_id: booking.conversation_id(),
                sender_id: booking.provider_id.clone(),
                sender_name: booking.provider_name.clone(),
                sender_role: ParticipantRole::Provider,
                receiver_id: booking.requester_id.clone(),
                receiver_name: booking.requester_name.clone(),
                receiver_role: ParticipantRole::Requester,
                body: templates::reupload_request(note),
                kind: MessageKind::System,
                booking_id: Some(booking.id),
            })
            .await?;
        Ok(())
    }

    async fn load(&self, booking_id: &BookingId) -> AppResult<Versioned<Booking>> {
        self.bookings
            .get(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))
    }

    fn deposit_of(booking: &Booking) -> AppResult<&Deposit> {
        booking
            .deposit()
            .ok_or_else(|| AppError::validation("Immediate bookings carry no deposit"))
    }

    async fn set_deposit_state(
        &self,
        mut stored: Versioned<Booking>,
        state: DepositState,
    ) -> AppResult<Booking> {
        if let Some(deposit) = stored.entity.deposit_mut() {
            deposit.state = state;
        }
        self.bookings
            .save_checked(&stored.entity, stored.revision)
            .await?;
        Ok(stored.entity)
    }

    async fn dispatch(&self, notification: Notification) {
        if let Err(e) = self.notifier.notify(notification).await {
            warn!(error = %e, "notification dispatch failed");
        }
    }
}
