//! # bookline-service
//!
//! Business logic service layer for Bookline. Each service orchestrates
//! repositories and collaborator traits to implement application-level
//! use cases: conversation messaging, the payment-gated booking
//! lifecycle, the deposit review loop, and the commission ledger.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod booking;
pub mod chat;
pub mod commission;
pub mod notification;

pub use booking::{
    BookingActionError, BookingRequest, BookingService, Decision, DepositWorkflow, Effect,
    GuardRejection, TransitionError,
};
pub use chat::ChatService;
pub use commission::CommissionLedger;
pub use notification::NotificationRules;
