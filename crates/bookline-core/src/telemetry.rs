//! Logging bootstrap.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::AppError;

/// Initialize the global tracing subscriber from configuration.
///
/// `RUST_LOG` overrides the configured level. Embedders that install
/// their own subscriber skip this and get an error if they call it
/// anyway.
pub fn init(config: &LoggingConfig) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let result = match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };
    result.map_err(|e| AppError::configuration(format!("Failed to initialize logging: {e}")))?;

    tracing::debug!(level = %config.level, format = %config.format, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_installs_subscriber_exactly_once() {
        let config = LoggingConfig::default();
        assert!(init(&config).is_ok());
        // The global subscriber is process-wide; a second install fails.
        assert!(init(&config).is_err());
    }
}
