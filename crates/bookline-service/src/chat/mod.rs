//! Conversation messaging.

pub mod service;
pub mod templates;

pub use service::ChatService;
