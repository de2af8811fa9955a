//! Platform commission ledger.

pub mod ledger;

pub use ledger::CommissionLedger;
