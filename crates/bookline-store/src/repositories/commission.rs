//! Commission ledger repository.

use std::sync::Arc;

use bookline_core::config::StoreConfig;
use bookline_core::result::AppResult;
use bookline_core::traits::DocumentStore;
use bookline_core::types::document::to_fields;
use bookline_core::types::filter::FilterField;
use bookline_core::types::id::BookingId;
use bookline_entity::commission::CommissionRecord;

use super::Versioned;

/// Repository for the commission ledger collection.
#[derive(Debug, Clone)]
pub struct CommissionRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl CommissionRepository {
    /// Create a repository bound to the configured commission collection.
    pub fn new(store: Arc<dyn DocumentStore>, config: &StoreConfig) -> Self {
        Self {
            store,
            collection: config.commissions_collection.clone(),
        }
    }

    /// Persist a new ledger record.
    pub async fn insert(&self, record: &CommissionRecord) -> AppResult<Versioned<CommissionRecord>> {
        let doc = self
            .store
            .create(
                &self.collection,
                record.id.to_string().as_str(),
                to_fields(record)?,
            )
            .await?;
        Ok(Versioned::new(record.clone(), doc.revision))
    }

    /// The active record for a booking, if one exists.
    pub async fn find_active_by_booking(
        &self,
        booking_id: &BookingId,
    ) -> AppResult<Option<Versioned<CommissionRecord>>> {
        let docs = self
            .store
            .query(
                &self.collection,
                &[
                    FilterField::eq("booking_id", booking_id.to_string()),
                    FilterField::eq("status", "active"),
                ],
            )
            .await?;
        let Some(doc) = docs.first() else {
            return Ok(None);
        };
        Ok(Some(Versioned::new(doc.to_entity()?, doc.revision)))
    }

    /// Write a record back only if nobody else wrote since it was read.
    pub async fn save_checked(
        &self,
        record: &CommissionRecord,
        expected_revision: u64,
    ) -> AppResult<Versioned<CommissionRecord>> {
        let doc = self
            .store
            .update_checked(
                &self.collection,
                record.id.to_string().as_str(),
                to_fields(record)?,
                expected_revision,
            )
            .await?;
        Ok(Versioned::new(record.clone(), doc.revision))
    }

    /// All active records owed by a provider, newest first.
    pub async fn find_active_by_provider(
        &self,
        provider_id: &str,
    ) -> AppResult<Vec<CommissionRecord>> {
        let docs = self
            .store
            .query(
                &self.collection,
                &[
                    FilterField::eq("provider_id", provider_id),
                    FilterField::eq("status", "active"),
                ],
            )
            .await?;
        let mut records = docs
            .iter()
            .map(|d| d.to_entity::<CommissionRecord>())
            .collect::<AppResult<Vec<_>>>()?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
