//! Provider bank details used by the accept gate.

use serde::{Deserialize, Serialize};

use bookline_core::config::RequiredBankFields;

/// A provider's bank account details for receiving the balance payment.
///
/// "Bank details complete" — every required field non-empty — is the gate
/// used by the accept transition for scheduled bookings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPaymentProfile {
    /// Bank name.
    pub bank_name: String,
    /// Account holder name.
    pub account_holder_name: String,
    /// Account number.
    pub account_number: String,
}

impl ProviderPaymentProfile {
    /// Create a profile from its three fields.
    pub fn new(
        bank_name: impl Into<String>,
        account_holder_name: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        Self {
            bank_name: bank_name.into(),
            account_holder_name: account_holder_name.into(),
            account_number: account_number.into(),
        }
    }

    /// Whether every required field is non-empty.
    pub fn is_complete(&self, required: &RequiredBankFields) -> bool {
        self.missing_fields(required).is_empty()
    }

    /// The required fields that are still empty, by name.
    pub fn missing_fields(&self, required: &RequiredBankFields) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if required.bank_name && self.bank_name.trim().is_empty() {
            missing.push("bank_name");
        }
        if required.account_holder_name && self.account_holder_name.trim().is_empty() {
            missing.push("account_holder_name");
        }
        if required.account_number && self.account_number.trim().is_empty() {
            missing.push("account_number");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completeness() {
        let required = RequiredBankFields::default();
        let complete = ProviderPaymentProfile::new("BCA", "Bob", "1234567890");
        assert!(complete.is_complete(&required));

        let missing_number = ProviderPaymentProfile::new("BCA", "Bob", "");
        assert!(!missing_number.is_complete(&required));
        assert_eq!(missing_number.missing_fields(&required), ["account_number"]);
    }

    #[test]
    fn test_relaxed_requirements() {
        let required = RequiredBankFields {
            bank_name: true,
            account_holder_name: false,
            account_number: true,
        };
        let profile = ProviderPaymentProfile::new("BCA", "", "1234567890");
        assert!(profile.is_complete(&required));
    }
}
