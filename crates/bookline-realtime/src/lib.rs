//! # bookline-realtime
//!
//! Realtime fan-out for Bookline. The transport multiplexes one broadcast
//! channel per document collection; subscriptions filter client-side down
//! to a single conversation or booking and deserialize matching change
//! events into typed entities.
//!
//! Delivery is at-most-once and lossy on lag: the broadcast ring buffer
//! overwrites unread events for slow consumers. Callers reconcile by
//! re-fetching history on reconnect.

pub mod bus;
pub mod subscription;

pub use bus::RealtimeBus;
pub use subscription::{BookingEvent, BookingSubscription, MessageEvent, MessageSubscription};
