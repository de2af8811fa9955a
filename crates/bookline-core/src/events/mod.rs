//! Change events emitted by the document store.
//!
//! The realtime transport multiplexes by collection: there is one event
//! channel per collection, and every write to a document in that collection
//! produces a [`ChangeEvent`] on it. Consumers filter client-side.

pub mod change;

pub use change::{ChangeEvent, ChangeKind};
