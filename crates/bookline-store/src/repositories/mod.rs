//! Typed repositories over the generic document store.
//!
//! Each repository owns one collection: it serializes entities into
//! documents on the way in and deserializes them on the way out, keeping
//! the store revision alongside for compare-and-swap updates.

pub mod booking;
pub mod commission;
pub mod message;

pub use booking::BookingRepository;
pub use commission::CommissionRepository;
pub use message::MessageRepository;

/// An entity paired with the store revision it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    /// The deserialized entity.
    pub entity: T,
    /// The document revision the entity was read at.
    pub revision: u64,
}

impl<T> Versioned<T> {
    /// Pair an entity with its revision.
    pub fn new(entity: T, revision: u64) -> Self {
        Self { entity, revision }
    }
}
