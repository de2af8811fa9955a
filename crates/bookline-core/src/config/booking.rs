//! Booking gating business-rule configuration.
//!
//! These are the named constants behind the accept-transition gates. They
//! are configuration, not hard-coded policy, so operators can relax a gate
//! without a deploy.

use serde::{Deserialize, Serialize};

/// Which provider bank fields must be non-empty for the bank-details gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredBankFields {
    /// Require the bank name.
    #[serde(default = "default_true")]
    pub bank_name: bool,
    /// Require the account holder name.
    #[serde(default = "default_true")]
    pub account_holder_name: bool,
    /// Require the account number.
    #[serde(default = "default_true")]
    pub account_number: bool,
}

impl Default for RequiredBankFields {
    fn default() -> Self {
        Self {
            bank_name: true,
            account_holder_name: true,
            account_number: true,
        }
    }
}

/// Booking lifecycle business rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// When true, scheduled bookings cannot be accepted by a provider with
    /// incomplete bank details (gate G1).
    #[serde(default = "default_true")]
    pub bank_details_required_for_scheduled_bookings: bool,
    /// Which bank fields count towards completeness.
    #[serde(default)]
    pub required_bank_fields: RequiredBankFields,
    /// Deposit percentage of price for scheduled bookings, e.g. 30.
    #[serde(default = "default_deposit_percentage")]
    pub scheduled_booking_deposit_percentage: u32,
    /// Platform commission as a fraction of price, e.g. 0.30.
    #[serde(default = "default_commission_rate")]
    pub commission_rate: f64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            bank_details_required_for_scheduled_bookings: true,
            required_bank_fields: RequiredBankFields::default(),
            scheduled_booking_deposit_percentage: default_deposit_percentage(),
            commission_rate: default_commission_rate(),
        }
    }
}

impl BookingConfig {
    /// Deposit amount for a given price: `round(price * pct / 100)`.
    pub fn deposit_amount(&self, price: i64) -> i64 {
        ((price as f64) * (self.scheduled_booking_deposit_percentage as f64) / 100.0).round()
            as i64
    }

    /// Commission amount for a given price: `round(price * rate)`.
    pub fn commission_amount(&self, price: i64) -> i64 {
        ((price as f64) * self.commission_rate).round() as i64
    }
}

fn default_true() -> bool {
    true
}

fn default_deposit_percentage() -> u32 {
    30
}

fn default_commission_rate() -> f64 {
    0.30
}
