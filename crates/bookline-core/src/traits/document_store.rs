//! Document store trait for the remote persistence collaborator.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::result::AppResult;
use crate::types::document::Document;
use crate::types::filter::FilterField;

/// Trait for the generic remote document store.
///
/// All Bookline state (messages, bookings, commission records) lives in
/// named collections of schemaless documents. Errors surface to the caller
/// unchanged; no retry is implemented at this layer.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create a document with the given id. Fails with `Conflict` if the id
    /// already exists in the collection.
    async fn create(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<Document>;

    /// Fetch a document by id.
    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>>;

    /// Merge the given fields into an existing document, unconditionally.
    /// Last write wins.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<Document>;

    /// Merge the given fields into an existing document only if its current
    /// revision equals `expected_revision`. Fails with `Conflict` when a
    /// concurrent writer got there first.
    async fn update_checked(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
        expected_revision: u64,
    ) -> AppResult<Document>;

    /// Query a collection. All filters must match (conjunction). The native
    /// result order is unspecified; callers impose their own ordering.
    async fn query(&self, collection: &str, filters: &[FilterField]) -> AppResult<Vec<Document>>;

    /// Delete a document by id. Returns `true` if it existed.
    async fn delete(&self, collection: &str, id: &str) -> AppResult<bool>;
}
