//! Commission ledger entity.

pub mod model;

pub use model::{CommissionRecord, CommissionState, CommissionStatus};
