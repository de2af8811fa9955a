//! Realtime transport trait: the shared event channel per collection.

use tokio::sync::broadcast;

use crate::events::change::ChangeEvent;

/// Trait for the realtime change transport.
///
/// The transport multiplexes by collection, not by conversation: one
/// channel carries every change to a collection, and subscribers filter
/// down to what they care about. Delivery is at-most-once — a lagging
/// receiver loses the oldest buffered events, and a dropped connection
/// loses everything until resubscription. The feed is a liveness
/// optimization; reconciliation is always a fresh query against the
/// document store.
pub trait ChangeFeed: Send + Sync + std::fmt::Debug + 'static {
    /// Open a subscription to all change events on a collection.
    fn watch(&self, collection: &str) -> broadcast::Receiver<ChangeEvent>;
}
