//! Commission ledger service.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use bookline_core::config::BookingConfig;
use bookline_core::error::AppError;
use bookline_core::result::AppResult;
use bookline_core::types::id::BookingId;
use bookline_entity::booking::Booking;
use bookline_entity::commission::{CommissionRecord, CommissionState};
use bookline_store::repositories::CommissionRepository;

/// Service owning the platform's commission records.
///
/// Records enter the ledger only when a booking completes and leave it
/// only by reversal after a post-confirmation cancellation. At most one
/// active record exists per booking.
#[derive(Debug, Clone)]
pub struct CommissionLedger {
    commissions: Arc<CommissionRepository>,
    config: BookingConfig,
}

impl CommissionLedger {
    /// Create the ledger service.
    pub fn new(commissions: Arc<CommissionRepository>, config: BookingConfig) -> Self {
        Self { commissions, config }
    }

    /// Create the commission record for a completed booking.
    ///
    /// Fails with `Conflict` if an active record already exists for the
    /// booking.
    pub async fn create(&self, booking: &Booking) -> AppResult<CommissionRecord> {
        if self
            .commissions
            .find_active_by_booking(&booking.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Booking {} already has an active commission record",
                booking.id
            )));
        }

        let amount = self.config.commission_amount(booking.price);
        let record = CommissionRecord::new(
            booking.id,
            booking.provider_id.clone(),
            amount,
            self.config.commission_rate,
        );
        self.commissions.insert(&record).await?;

        info!(
            booking_id = %booking.id,
            provider_id = %booking.provider_id,
            amount,
            "commission record created"
        );
        Ok(record)
    }

    /// Reverse the active record for a booking.
    ///
    /// Returns `Ok(None)` when no active record exists; cancellation of a
    /// never-completed booking is a normal path, not an error.
    pub async fn reverse(
        &self,
        booking_id: &BookingId,
        reason: impl Into<String>,
    ) -> AppResult<Option<CommissionRecord>> {
        let Some(stored) = self.commissions.find_active_by_booking(booking_id).await? else {
            return Ok(None);
        };

        let mut record = stored.entity;
        record.state = CommissionState::Reversed {
            reversed_at: Utc::now(),
            reversal_reason: reason.into(),
        };
        self.commissions.save_checked(&record, stored.revision).await?;

        info!(booking_id = %booking_id, commission_id = %record.id, "commission reversed");
        Ok(Some(record))
    }

    /// All active records owed by a provider.
    pub async fn active_for_provider(&self, provider_id: &str) -> AppResult<Vec<CommissionRecord>> {
        self.commissions.find_active_by_provider(provider_id).await
    }

    /// Sum of active amounts owed by a provider.
    pub async fn total_active_amount(&self, provider_id: &str) -> AppResult<i64> {
        Ok(self
            .active_for_provider(provider_id)
            .await?
            .iter()
            .map(|r| r.amount)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookline_core::config::StoreConfig;
    use bookline_core::error::ErrorKind;
    use bookline_store::memory::MemoryDocumentStore;

    fn ledger() -> CommissionLedger {
        let store = Arc::new(MemoryDocumentStore::default());
        CommissionLedger::new(
            Arc::new(CommissionRepository::new(store, &StoreConfig::default())),
            BookingConfig::default(),
        )
    }

    fn booking() -> Booking {
        Booking::new_immediate("u1", "Alice", "p1", "Bob", "90min massage", 90, 1_000_000)
    }

    #[tokio::test]
    async fn test_create_computes_amount_from_rate() {
        let ledger = ledger();
        let record = ledger.create(&booking()).await.unwrap();
        assert_eq!(record.amount, 300_000);
        assert_eq!(ledger.total_active_amount("p1").await.unwrap(), 300_000);
    }

    #[tokio::test]
    async fn test_second_active_record_refused() {
        let ledger = ledger();
        let booking = booking();
        ledger.create(&booking).await.unwrap();

        let err = ledger.create(&booking).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_reverse_is_noop_without_active_record() {
        let ledger = ledger();
        let reversed = ledger
            .reverse(&BookingId::new(), "cancelled")
            .await
            .unwrap();
        assert!(reversed.is_none());
    }

    #[tokio::test]
    async fn test_create_then_reverse_symmetry() {
        let ledger = ledger();
        let booking = booking();
        ledger.create(&booking).await.unwrap();

        let reversed = ledger
            .reverse(&booking.id, "cancelled after confirmation")
            .await
            .unwrap()
            .unwrap();
        assert!(!reversed.is_active());
        assert_eq!(ledger.total_active_amount("p1").await.unwrap(), 0);

        // A second reversal finds nothing active.
        assert!(ledger.reverse(&booking.id, "again").await.unwrap().is_none());
    }
}
