//! Provider payment profile.

pub mod profile;

pub use profile::ProviderPaymentProfile;
