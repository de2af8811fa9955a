//! In-memory object storage for tests and single-node runs.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use uuid::Uuid;

use bookline_core::result::AppResult;
use bookline_core::traits::{ObjectStorage, StoredObject};

/// Object storage backed by a process-local map.
///
/// URLs use the `memory://` scheme and are stable for the lifetime of the
/// instance, which is all the deposit workflow needs in tests.
#[derive(Debug, Default)]
pub struct MemoryObjectStorage {
    /// `bucket/file_id` → object bytes.
    objects: DashMap<String, Bytes>,
}

impl MemoryObjectStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch stored bytes back, if present.
    pub fn get(&self, bucket: &str, file_id: &str) -> Option<Bytes> {
        self.objects
            .get(&format!("{bucket}/{file_id}"))
            .map(|b| b.value().clone())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn upload(&self, bucket: &str, file_name: &str, data: Bytes) -> AppResult<StoredObject> {
        let file_id = Uuid::new_v4().to_string();
        self.objects.insert(format!("{bucket}/{file_id}"), data);
        Ok(StoredObject {
            url: format!("memory://{bucket}/{file_id}/{file_name}"),
            file_id,
        })
    }
}
