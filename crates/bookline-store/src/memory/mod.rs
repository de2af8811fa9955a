//! In-memory collaborator implementations.
//!
//! These back the collaborator traits for tests and single-node
//! deployments. The document store doubles as the realtime transport by
//! publishing a change event for every write.

pub mod document_store;
pub mod notifier;
pub mod object_storage;

pub use document_store::MemoryDocumentStore;
pub use notifier::{LogNotifier, RecordingNotifier};
pub use object_storage::MemoryObjectStorage;
