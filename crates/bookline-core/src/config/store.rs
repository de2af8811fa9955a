//! Document store collection names and query limits.

use serde::{Deserialize, Serialize};

/// Document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Collection holding chat messages.
    #[serde(default = "default_messages_collection")]
    pub messages_collection: String,
    /// Collection holding bookings.
    #[serde(default = "default_bookings_collection")]
    pub bookings_collection: String,
    /// Collection holding commission ledger records.
    #[serde(default = "default_commissions_collection")]
    pub commissions_collection: String,
    /// Bucket for uploaded payment proof images.
    #[serde(default = "default_proof_bucket")]
    pub payment_proof_bucket: String,
    /// Maximum number of messages returned by a conversation fetch.
    /// Callers needing deeper history must paginate.
    #[serde(default = "default_message_page_limit")]
    pub message_page_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            messages_collection: default_messages_collection(),
            bookings_collection: default_bookings_collection(),
            commissions_collection: default_commissions_collection(),
            payment_proof_bucket: default_proof_bucket(),
            message_page_limit: default_message_page_limit(),
        }
    }
}

fn default_messages_collection() -> String {
    "messages".to_string()
}

fn default_bookings_collection() -> String {
    "bookings".to_string()
}

fn default_commissions_collection() -> String {
    "commission_records".to_string()
}

fn default_proof_bucket() -> String {
    "payment_proofs".to_string()
}

fn default_message_page_limit() -> usize {
    100
}
