//! Collaborator traits consumed by the Bookline services.
//!
//! Persistence, binary storage, realtime transport, and push delivery are
//! external systems. They are consumed through these narrow interfaces and
//! not re-specified here; `bookline-store` carries in-memory
//! implementations for tests and single-node use.

pub mod change_feed;
pub mod document_store;
pub mod notifier;
pub mod object_storage;

pub use change_feed::ChangeFeed;
pub use document_store::DocumentStore;
pub use notifier::{Notification, Notifier, Recipient};
pub use object_storage::{ObjectStorage, StoredObject};
