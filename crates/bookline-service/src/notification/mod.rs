//! Notification composition rules.

pub mod rules;

pub use rules::NotificationRules;
