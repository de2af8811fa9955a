//! Booking entity: the unit being negotiated.

pub mod deposit;
pub mod model;
pub mod status;

pub use deposit::{Deposit, DepositState};
pub use model::{Booking, BookingState, Schedule};
pub use status::{BookingStatus, CancelActor};
