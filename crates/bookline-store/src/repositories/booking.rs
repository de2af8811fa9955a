//! Booking collection repository.

use std::sync::Arc;

use bookline_core::config::StoreConfig;
use bookline_core::result::AppResult;
use bookline_core::traits::DocumentStore;
use bookline_core::types::document::to_fields;
use bookline_core::types::filter::FilterField;
use bookline_core::types::id::BookingId;
use bookline_entity::booking::Booking;

use super::Versioned;

/// Repository for the booking collection.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl BookingRepository {
    /// Create a repository bound to the configured booking collection.
    pub fn new(store: Arc<dyn DocumentStore>, config: &StoreConfig) -> Self {
        Self {
            store,
            collection: config.bookings_collection.clone(),
        }
    }

    /// Persist a new booking.
    pub async fn insert(&self, booking: &Booking) -> AppResult<Versioned<Booking>> {
        let doc = self
            .store
            .create(
                &self.collection,
                booking.id.to_string().as_str(),
                to_fields(booking)?,
            )
            .await?;
        Ok(Versioned::new(booking.clone(), doc.revision))
    }

    /// Load a booking with the revision it was read at.
    pub async fn get(&self, id: &BookingId) -> AppResult<Option<Versioned<Booking>>> {
        let Some(doc) = self.store.get(&self.collection, id.to_string().as_str()).await? else {
            return Ok(None);
        };
        Ok(Some(Versioned::new(doc.to_entity()?, doc.revision)))
    }

    /// Write a booking back only if nobody else wrote since it was read.
    ///
    /// Returns a `Conflict` error when the revision has moved on.
    pub async fn save_checked(
        &self,
        booking: &Booking,
        expected_revision: u64,
    ) -> AppResult<Versioned<Booking>> {
        let doc = self
            .store
            .update_checked(
                &self.collection,
                booking.id.to_string().as_str(),
                to_fields(booking)?,
                expected_revision,
            )
            .await?;
        Ok(Versioned::new(booking.clone(), doc.revision))
    }

    /// All bookings addressed to a provider, newest first.
    pub async fn find_for_provider(&self, provider_id: &str) -> AppResult<Vec<Booking>> {
        self.find_by("provider_id", provider_id).await
    }

    /// All bookings made by a requester, newest first.
    pub async fn find_for_requester(&self, requester_id: &str) -> AppResult<Vec<Booking>> {
        self.find_by("requester_id", requester_id).await
    }

    async fn find_by(&self, field: &str, value: &str) -> AppResult<Vec<Booking>> {
        let docs = self
            .store
            .query(&self.collection, &[FilterField::eq(field, value)])
            .await?;
        let mut bookings = docs
            .iter()
            .map(|d| d.to_entity::<Booking>())
            .collect::<AppResult<Vec<_>>>()?;
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocumentStore;
    use bookline_core::error::ErrorKind;
    use bookline_entity::booking::BookingState;
    use chrono::Utc;

    fn repo() -> BookingRepository {
        BookingRepository::new(
            Arc::new(MemoryDocumentStore::default()),
            &StoreConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo();
        let booking = Booking::new_immediate("u1", "Alice", "p1", "Bob", "60min", 60, 500_000);
        repo.insert(&booking).await.unwrap();

        let loaded = repo.get(&booking.id).await.unwrap().unwrap();
        assert_eq!(loaded.revision, 1);
        assert_eq!(loaded.entity.price, 500_000);
    }

    #[tokio::test]
    async fn test_save_checked_conflicts_on_stale_read() {
        let repo = repo();
        let mut booking = Booking::new_immediate("u1", "Alice", "p1", "Bob", "60min", 60, 500_000);
        let stored = repo.insert(&booking).await.unwrap();

        booking.state = BookingState::Confirmed { confirmed_at: Utc::now() };
        repo.save_checked(&booking, stored.revision).await.unwrap();

        let err = repo.save_checked(&booking, stored.revision).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_find_for_provider_newest_first() {
        let repo = repo();
        let first = Booking::new_immediate("u1", "Alice", "p1", "Bob", "60min", 60, 500_000);
        let mut second = Booking::new_immediate("u2", "Carol", "p1", "Bob", "90min", 90, 800_000);
        second.created_at = first.created_at + chrono::Duration::seconds(10);
        repo.insert(&first).await.unwrap();
        repo.insert(&second).await.unwrap();

        let bookings = repo.find_for_provider("p1").await.unwrap();
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].id, second.id);

        assert!(repo.find_for_requester("u2").await.unwrap().len() == 1);
    }
}
