//! Payment-gated booking lifecycle.

pub mod deposit;
pub mod machine;
pub mod service;

pub use deposit::DepositWorkflow;
pub use machine::{Decision, Effect, GuardRejection, TransitionError};
pub use service::{BookingActionError, BookingRequest, BookingService};
