//! Chat message entity.

pub mod kind;
pub mod model;
pub mod role;

pub use kind::MessageKind;
pub use model::{Message, MessageInput};
pub use role::ParticipantRole;
