//! Object storage trait for uploaded binary proof images.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A successfully stored binary object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObject {
    /// Identifier assigned by the storage backend.
    pub file_id: String,
    /// Publicly resolvable URL for the object.
    pub url: String,
}

/// Trait for the binary object storage collaborator.
///
/// Used for payment proof photographs. Only upload is needed by the core;
/// listing and cleanup are infrastructure concerns.
#[async_trait]
pub trait ObjectStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Upload an object into a bucket and return its identity and URL.
    async fn upload(&self, bucket: &str, file_name: &str, data: Bytes) -> AppResult<StoredObject>;
}
