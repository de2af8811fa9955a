//! Document change event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::document::Document;

/// What kind of write produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A document was created.
    Created,
    /// An existing document was updated.
    Updated,
    /// A document was deleted.
    Deleted,
}

/// A single document change on a collection channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// The collection the document belongs to.
    pub collection: String,
    /// The kind of write.
    pub kind: ChangeKind,
    /// The document after the write (last known state for deletes).
    pub document: Document,
    /// When the event was emitted.
    pub emitted_at: DateTime<Utc>,
}

impl ChangeEvent {
    /// Create a new change event stamped with the current time.
    pub fn new(collection: impl Into<String>, kind: ChangeKind, document: Document) -> Self {
        Self {
            collection: collection.into(),
            kind,
            document,
            emitted_at: Utc::now(),
        }
    }
}
