//! In-memory document store for single-node deployments and tests.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use tracing::debug;

use bookline_core::error::AppError;
use bookline_core::events::{ChangeEvent, ChangeKind};
use bookline_core::result::AppResult;
use bookline_core::traits::{ChangeFeed, DocumentStore};
use bookline_core::types::document::Document;
use bookline_core::types::filter::FilterField;

/// In-memory [`DocumentStore`] keyed by collection name.
///
/// Every write publishes a [`ChangeEvent`] on a per-collection broadcast
/// channel, so the same instance also serves as the realtime transport
/// ([`ChangeFeed`]).
#[derive(Debug)]
pub struct MemoryDocumentStore {
    /// Collection name → document id → document.
    collections: DashMap<String, DashMap<String, Document>>,
    /// Collection name → change-event broadcast sender.
    channels: DashMap<String, broadcast::Sender<ChangeEvent>>,
    /// Ring buffer size for change channels.
    buffer_size: usize,
}

impl MemoryDocumentStore {
    /// Create a new empty store.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            collections: DashMap::new(),
            channels: DashMap::new(),
            buffer_size,
        }
    }

    fn publish(&self, collection: &str, kind: ChangeKind, document: Document) {
        if let Some(tx) = self.channels.get(collection) {
            // Nobody listening is fine.
            let _ = tx.send(ChangeEvent::new(collection, kind, document));
        }
    }

    fn merge(target: &mut Map<String, Value>, fields: Map<String, Value>) {
        for (key, value) in fields {
            target.insert(key, value);
        }
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<Document> {
        let docs = self
            .collections
            .entry(collection.to_string())
            .or_default();

        if docs.contains_key(id) {
            return Err(AppError::conflict(format!(
                "Document '{id}' already exists in '{collection}'"
            )));
        }

        let now = Utc::now();
        let document = Document {
            id: id.to_string(),
            revision: 1,
            fields,
            created_at: now,
            updated_at: now,
        };
        docs.insert(id.to_string(), document.clone());
        drop(docs);

        debug!(collection, id, "document created");
        self.publish(collection, ChangeKind::Created, document.clone());
        Ok(document)
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id).map(|d| d.value().clone())))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<Document> {
        let docs = self.collections.get(collection).ok_or_else(|| {
            AppError::not_found(format!("Collection '{collection}' not found"))
        })?;
        let mut entry = docs.get_mut(id).ok_or_else(|| {
            AppError::not_found(format!("Document '{id}' not found in '{collection}'"))
        })?;

        Self::merge(&mut entry.fields, fields);
        entry.revision += 1;
        entry.updated_at = Utc::now();
        let updated = entry.clone();
        drop(entry);
        drop(docs);

        debug!(collection, id, revision = updated.revision, "document updated");
        self.publish(collection, ChangeKind::Updated, updated.clone());
        Ok(updated)
    }

    async fn update_checked(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
        expected_revision: u64,
    ) -> AppResult<Document> {
        let docs = self.collections.get(collection).ok_or_else(|| {
            AppError::not_found(format!("Collection '{collection}' not found"))
        })?;
        let mut entry = docs.get_mut(id).ok_or_else(|| {
            AppError::not_found(format!("Document '{id}' not found in '{collection}'"))
        })?;

        if entry.revision != expected_revision {
            return Err(AppError::conflict(format!(
                "Revision mismatch on '{collection}/{id}': expected {expected_revision}, found {}",
                entry.revision
            )));
        }

        Self::merge(&mut entry.fields, fields);
        entry.revision += 1;
        entry.updated_at = Utc::now();
        let updated = entry.clone();
        drop(entry);
        drop(docs);

        self.publish(collection, ChangeKind::Updated, updated.clone());
        Ok(updated)
    }

    async fn query(&self, collection: &str, filters: &[FilterField]) -> AppResult<Vec<Document>> {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        let null = Value::Null;
        Ok(docs
            .iter()
            .filter(|doc| {
                filters.iter().all(|f| {
                    let field = doc.fields.get(&f.field).unwrap_or(&null);
                    f.value.matches(f.op, field)
                })
            })
            .map(|doc| doc.value().clone())
            .collect())
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<bool> {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(false);
        };
        match docs.remove(id) {
            Some((_, document)) => {
                drop(docs);
                self.publish(collection, ChangeKind::Deleted, document);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl ChangeFeed for MemoryDocumentStore {
    fn watch(&self, collection: &str) -> broadcast::Receiver<ChangeEvent> {
        self.channels
            .entry(collection.to_string())
            .or_insert_with(|| broadcast::channel(self.buffer_size).0)
            .subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryDocumentStore::default();
        let doc = store
            .create("bookings", "b1", fields(&[("status", json!("pending"))]))
            .await
            .unwrap();
        assert_eq!(doc.revision, 1);

        let fetched = store.get("bookings", "b1").await.unwrap().unwrap();
        assert_eq!(fetched.str_field("status"), Some("pending"));
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let store = MemoryDocumentStore::default();
        store.create("bookings", "b1", Map::new()).await.unwrap();
        let err = store.create("bookings", "b1", Map::new()).await.unwrap_err();
        assert_eq!(err.kind, bookline_core::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_checked_rejects_stale_revision() {
        let store = MemoryDocumentStore::default();
        store
            .create("bookings", "b1", fields(&[("status", json!("pending"))]))
            .await
            .unwrap();

        // First writer wins.
        store
            .update_checked("bookings", "b1", fields(&[("status", json!("confirmed"))]), 1)
            .await
            .unwrap();

        // Second writer with the stale revision is rejected.
        let err = store
            .update_checked("bookings", "b1", fields(&[("status", json!("cancelled"))]), 1)
            .await
            .unwrap_err();
        assert_eq!(err.kind, bookline_core::error::ErrorKind::Conflict);

        let doc = store.get("bookings", "b1").await.unwrap().unwrap();
        assert_eq!(doc.str_field("status"), Some("confirmed"));
    }

    #[tokio::test]
    async fn test_query_filters() {
        let store = MemoryDocumentStore::default();
        store
            .create("messages", "m1", fields(&[("conversation_id", json!("u1_p1"))]))
            .await
            .unwrap();
        store
            .create("messages", "m2", fields(&[("conversation_id", json!("u2_p1"))]))
            .await
            .unwrap();

        let found = store
            .query("messages", &[FilterField::eq("conversation_id", "u1_p1")])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "m1");
    }

    #[tokio::test]
    async fn test_watch_receives_changes() {
        let store = MemoryDocumentStore::default();
        let mut rx = store.watch("messages");

        store
            .create("messages", "m1", fields(&[("body", json!("hi"))]))
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, ChangeKind::Created);
        assert_eq!(event.document.id, "m1");
    }
}
