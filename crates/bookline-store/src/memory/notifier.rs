//! Notifier implementations for local runs and tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use bookline_core::result::AppResult;
use bookline_core::traits::{Notification, Notifier};

/// Notifier that only writes a log line per delivery.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> AppResult<()> {
        info!(
            kind = %notification.kind,
            recipient = ?notification.recipient,
            urgent = notification.urgent,
            title = %notification.title,
            "notification dispatched"
        );
        Ok(())
    }
}

/// Notifier that records every delivery for test assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications delivered so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) -> AppResult<()> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification);
        }
        Ok(())
    }
}
