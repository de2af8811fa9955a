//! The generic document shape exchanged with the remote document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// A single document in a document-store collection.
///
/// Domain entities serialize their fields into the open `fields` bag; the
/// store attaches identity, a monotonically increasing `revision` used for
/// compare-and-swap updates, and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier, unique within its collection.
    pub id: String,
    /// Revision counter, incremented on every write. Starts at 1.
    pub revision: u64,
    /// The document payload.
    pub fields: Map<String, Value>,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last written.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Build a fresh first-revision document from a serializable entity.
    pub fn from_entity<T: Serialize>(id: impl Into<String>, entity: &T) -> Result<Self, AppError> {
        let now = Utc::now();
        Ok(Self {
            id: id.into(),
            revision: 1,
            fields: to_fields(entity)?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Deserialize the payload into a typed entity.
    pub fn to_entity<T: for<'de> Deserialize<'de>>(&self) -> Result<T, AppError> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(AppError::from)
    }

    /// Read a string field from the payload, if present.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// Serialize an entity into a document field map.
pub fn to_fields<T: Serialize>(entity: &T) -> Result<Map<String, Value>, AppError> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::internal(format!(
            "Entity did not serialize to an object: {other:?}"
        ))),
    }
}
