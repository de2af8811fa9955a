//! Realtime change-feed configuration.

use serde::{Deserialize, Serialize};

/// Realtime channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Ring buffer size for each collection's broadcast channel. A receiver
    /// that lags past this many events loses the oldest ones.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}
