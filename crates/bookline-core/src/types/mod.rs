//! Shared type definitions: typed IDs, conversation identity, documents,
//! and query filters.

pub mod conversation;
pub mod document;
pub mod filter;
pub mod id;

pub use conversation::ConversationId;
pub use document::Document;
pub use filter::{FilterField, FilterOp, FilterValue};
