//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod booking;
pub mod logging;
pub mod realtime;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::booking::{BookingConfig, RequiredBankFields};
pub use self::logging::LoggingConfig;
pub use self::realtime::RealtimeConfig;
pub use self::store::StoreConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Booking gating business rules.
    #[serde(default)]
    pub booking: BookingConfig,
    /// Document store collection names and limits.
    #[serde(default)]
    pub store: StoreConfig,
    /// Realtime channel settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `BOOKLINE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BOOKLINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_falls_back_to_defaults_without_files() {
        let config = AppConfig::load("test-no-such-env").unwrap();
        assert_eq!(config.booking.scheduled_booking_deposit_percentage, 30);
        assert_eq!(config.store.message_page_limit, 100);
        assert_eq!(config.realtime.channel_buffer_size, 256);
    }

    #[test]
    fn test_env_variables_override_defaults() {
        unsafe {
            std::env::set_var("BOOKLINE__BOOKING__COMMISSION_RATE", "0.25");
        }
        let config = AppConfig::load("test-no-such-env").unwrap();
        unsafe {
            std::env::remove_var("BOOKLINE__BOOKING__COMMISSION_RATE");
        }

        assert_eq!(config.booking.commission_rate, 0.25);
        assert_eq!(config.booking.commission_amount(1_000_000), 250_000);
        // Sections not named by the override keep their defaults.
        assert_eq!(config.store.message_page_limit, 100);
    }
}
