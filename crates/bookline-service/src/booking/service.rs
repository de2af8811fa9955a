//! Booking lifecycle orchestration.
//!
//! The service loads the booking, asks the pure machine for a decision,
//! persists the new state with a compare-and-swap write, and then applies
//! the decision's effects. A concurrent writer loses the swap and gets a
//! `Conflict` error instead of silently overwriting.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use bookline_core::config::BookingConfig;
use bookline_core::error::AppError;
use bookline_core::result::AppResult;
use bookline_core::traits::{Notification, Notifier};
use bookline_core::types::id::BookingId;
use bookline_entity::booking::{Booking, BookingStatus, CancelActor};
use bookline_entity::message::{MessageInput, MessageKind, ParticipantRole};
use bookline_entity::payment::ProviderPaymentProfile;
use bookline_store::repositories::BookingRepository;

use crate::chat::{templates, ChatService};
use crate::commission::CommissionLedger;
use crate::notification::NotificationRules;

use super::machine::{self, Effect, TransitionError};

/// Why a booking action did not go through.
#[derive(Debug, Error)]
pub enum BookingActionError {
    /// The state machine refused the transition.
    #[error(transparent)]
    Transition(#[from] TransitionError),
    /// A collaborator failed or the booking was not found.
    #[error(transparent)]
    App(#[from] AppError),
}

/// Input for creating a booking.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// Requester identifier.
    pub requester_id: String,
    /// Requester display name.
    pub requester_name: String,
    /// Provider identifier.
    pub provider_id: String,
    /// Provider display name.
    pub provider_name: String,
    /// What is being requested.
    pub service_description: String,
    /// Service duration in minutes.
    pub duration_minutes: u32,
    /// Full agreed price.
    pub price: i64,
}

/// Service driving the booking lifecycle.
#[derive(Debug, Clone)]
pub struct BookingService {
    bookings: Arc<BookingRepository>,
    chat: Arc<ChatService>,
    ledger: Arc<CommissionLedger>,
    notifier: Arc<dyn Notifier>,
    rules: NotificationRules,
    config: BookingConfig,
}

impl BookingService {
    /// Create the booking service.
    pub fn new(
        bookings: Arc<BookingRepository>,
        chat: Arc<ChatService>,
        ledger: Arc<CommissionLedger>,
        notifier: Arc<dyn Notifier>,
        config: BookingConfig,
    ) -> Self {
        Self {
            bookings,
            chat,
            ledger,
            notifier,
            rules: NotificationRules::new(),
            config,
        }
    }

    /// Create a pending immediate booking.
    ///
    /// Posts the booking-request message into the conversation and
    /// notifies the provider.
    pub async fn request_immediate(&self, request: BookingRequest) -> AppResult<Booking> {
        let booking = Booking::new_immediate(
            request.requester_id,
            request.requester_name,
            request.provider_id,
            request.provider_name,
            request.service_description,
            request.duration_minutes,
            request.price,
        );
        self.persist_new(booking).await
    }

    /// Create a pending scheduled booking with an unpaid deposit.
    ///
    /// The deposit amount is a configured percentage of the price. A
    /// deposit payment card is posted alongside the booking-request
    /// message so the requester knows what to transfer.
    pub async fn request_scheduled(
        &self,
        request: BookingRequest,
        date: NaiveDate,
        time: NaiveTime,
    ) -> AppResult<Booking> {
        let deposit = self.config.deposit_amount(request.price);
        let booking = Booking::new_scheduled(
            request.requester_id,
            request.requester_name,
            request.provider_id,
            request.provider_name,
            request.service_description,
            request.duration_minutes,
            request.price,
            date,
            time,
            deposit,
        );
        let booking = self.persist_new(booking).await?;

        self.chat
            .send(MessageInput {
                body: templates::deposit_request(deposit),
                kind: MessageKind::PaymentCard { amount: deposit },
                ..self.provider_to_requester(&booking)
            })
            .await?;
        Ok(booking)
    }

    async fn persist_new(&self, booking: Booking) -> AppResult<Booking> {
        self.bookings.insert(&booking).await?;

        self.chat
            .send(MessageInput {
                body: templates::booking_request(&booking),
                kind: MessageKind::BookingRequest {
                    scheduled: booking.is_scheduled(),
                },
                ..self.requester_to_provider(&booking)
            })
            .await?;
        self.dispatch(self.rules.booking_requested(&booking)).await;

        info!(booking_id = %booking.id, scheduled = booking.is_scheduled(), "booking requested");
        Ok(booking)
    }

    /// Accept a pending booking as the provider.
    ///
    /// For scheduled bookings the gates are checked in order: bank
    /// details, deposit paid, deposit approved.
    pub async fn accept(
        &self,
        booking_id: &BookingId,
        profile: &ProviderPaymentProfile,
    ) -> Result<Booking, BookingActionError> {
        let stored = self.load(booking_id).await?;
        let decision = machine::accept(&stored.entity, profile, &self.config, Utc::now())?;
        self.apply(stored.entity, stored.revision, decision, None, None)
            .await
    }

    /// Reject a pending booking as the provider.
    pub async fn reject(
        &self,
        booking_id: &BookingId,
        reason: &str,
    ) -> Result<Booking, BookingActionError> {
        let stored = self.load(booking_id).await?;
        let decision = machine::reject(&stored.entity, reason, Utc::now())?;
        self.apply(
            stored.entity,
            stored.revision,
            decision,
            Some(CancelActor::Provider),
            Some(reason),
        )
        .await
    }

    /// Mark a confirmed booking as completed, earning the commission.
    pub async fn complete(&self, booking_id: &BookingId) -> Result<Booking, BookingActionError> {
        let stored = self.load(booking_id).await?;
        let decision = machine::complete(&stored.entity, Utc::now())?;
        self.apply(stored.entity, stored.revision, decision, None, None)
            .await
    }

    /// Cancel a pending or confirmed booking.
    pub async fn cancel(
        &self,
        booking_id: &BookingId,
        actor: CancelActor,
        reason: &str,
    ) -> Result<Booking, BookingActionError> {
        let stored = self.load(booking_id).await?;
        let decision = machine::cancel(&stored.entity, actor, reason, Utc::now())?;
        self.apply(stored.entity, stored.revision, decision, Some(actor), Some(reason))
            .await
    }

    /// Load a booking by id.
    pub async fn get(&self, booking_id: &BookingId) -> AppResult<Option<Booking>> {
        Ok(self.bookings.get(booking_id).await?.map(|v| v.entity))
    }

    /// All bookings addressed to a provider, newest first.
    pub async fn list_for_provider(&self, provider_id: &str) -> AppResult<Vec<Booking>> {
        self.bookings.find_for_provider(provider_id).await
    }

    /// All bookings made by a requester, newest first.
    pub async fn list_for_requester(&self, requester_id: &str) -> AppResult<Vec<Booking>> {
        self.bookings.find_for_requester(requester_id).await
    }

    async fn load(
        &self,
        booking_id: &BookingId,
    ) -> AppResult<bookline_store::Versioned<Booking>> {
        self.bookings
            .get(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))
    }

    /// Persist the decided state, then apply its effects.
    async fn apply(
        &self,
        mut booking: Booking,
        revision: u64,
        decision: machine::Decision,
        actor: Option<CancelActor>,
        reason: Option<&str>,
    ) -> Result<Booking, BookingActionError> {
        booking.state = decision.new_state;
        self.bookings.save_checked(&booking, revision).await?;

        for effect in decision.effects {
            self.apply_effect(&booking, effect, actor).await?;
        }
        if let Some(n) = self.rules.for_status(&booking, booking.status(), actor, reason) {
            self.dispatch(n).await;
        }

        info!(booking_id = %booking.id, status = %booking.status(), "booking transitioned");
        Ok(booking)
    }

    async fn apply_effect(
        &self,
        booking: &Booking,
        effect: Effect,
        actor: Option<CancelActor>,
    ) -> AppResult<()> {
        match effect {
            Effect::StatusMessage { status, reason } => {
                let base = if status == BookingStatus::Cancelled
                    && actor == Some(CancelActor::Requester)
                {
                    self.requester_to_provider(booking)
                } else {
                    self.provider_to_requester(booking)
                };
                self.chat
                    .send(MessageInput {
                        body: templates::status_update(booking, status, reason.as_deref()),
                        kind: MessageKind::StatusUpdate { status },
                        ..base
                    })
                    .await?;
            }
            Effect::PaymentCard { amount } => {
                self.chat
                    .send(MessageInput {
                        body: templates::payment_card(booking, amount),
                        kind: MessageKind::PaymentCard { amount },
                        ..self.provider_to_requester(booking)
                    })
                    .await?;
            }
            Effect::CreateCommission => {
                self.ledger.create(booking).await?;
            }
            Effect::ReverseCommission { reason } => {
                self.ledger.reverse(&booking.id, reason).await?;
            }
        }
        Ok(())
    }

    /// Message skeleton from the provider to the requester.
    fn provider_to_requester(&self, booking: &Booking) -> MessageInput {
        MessageInput {
            conversation_id: booking.conversation_id(),
            sender_id: booking.provider_id.clone(),
            sender_name: booking.provider_name.clone(),
            sender_role: ParticipantRole::Provider,
            receiver_id: booking.requester_id.clone(),
            receiver_name: booking.requester_name.clone(),
            receiver_role: ParticipantRole::Requester,
            body: String::new(),
            kind: MessageKind::System,
            booking_id: Some(booking.id),
        }
    }

    /// Message skeleton from the requester to the provider.
    fn requester_to_provider(&self, booking: &Booking) -> MessageInput {
        MessageInput {
            conversation_id: booking.conversation_id(),
            sender_id: booking.requester_id.clone(),
            sender_name: booking.requester_name.clone(),
            sender_role: ParticipantRole::Requester,
            receiver_id: booking.provider_id.clone(),
            receiver_name: booking.provider_name.clone(),
            receiver_role: ParticipantRole::Provider,
            body: String::new(),
            kind: MessageKind::System,
            booking_id: Some(booking.id),
        }
    }

    /// Dispatch a notification, logging and swallowing failures.
    async fn dispatch(&self, notification: Notification) {
        if let Err(e) = self.notifier.notify(notification).await {
            warn!(error = %e, "notification dispatch failed");
        }
    }
}
