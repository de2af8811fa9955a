//! Conversation identity derivation.
//!
//! A conversation is not a stored entity. Its identifier is derived from
//! the (requester, provider) pair so that both clients can compute the
//! same channel name without a handshake — no server round trip, no race
//! over who creates the thread first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Separator between the requester and provider segments.
const SEPARATOR: char = '_';

/// The canonical identifier for a two-party message thread.
///
/// Format: `"{requester_id}_{provider_id}"`. The identifier is stable,
/// case-sensitive, and reproducible by either party independently.
/// Participant IDs containing the separator cannot be represented and
/// fail [`ConversationId::parse`] rather than mis-pairing silently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Derive the conversation identifier for a (requester, provider) pair.
    ///
    /// Pure and deterministic: two independent clients calling this for the
    /// same pair converge without coordination. Empty IDs are a caller
    /// contract violation, not a handled failure mode.
    pub fn derive(requester_id: &str, provider_id: &str) -> Self {
        debug_assert!(!requester_id.is_empty(), "requester id must be non-empty");
        debug_assert!(!provider_id.is_empty(), "provider id must be non-empty");
        Self(format!("{requester_id}{SEPARATOR}{provider_id}"))
    }

    /// Parse and validate an existing identifier.
    ///
    /// Valid iff splitting on the separator yields exactly two non-empty
    /// segments.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(AppError::validation(format!(
                "Invalid conversation id: '{s}'. Expected '{{requester}}_{{provider}}'"
            )))
        }
    }

    /// Check whether a string is a well-formed conversation identifier.
    pub fn is_valid(s: &str) -> bool {
        let mut parts = s.split(SEPARATOR);
        matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(requester), Some(provider), None)
                if !requester.is_empty() && !provider.is_empty()
        )
    }

    /// Extract the participants as `(requester_id, provider_id)`.
    pub fn participants(&self) -> (&str, &str) {
        // Invariant: constructed values always split into exactly two segments.
        let mut parts = self.0.split(SEPARATOR);
        let requester = parts.next().unwrap_or_default();
        let provider = parts.next().unwrap_or_default();
        (requester, provider)
    }

    /// The requester segment.
    pub fn requester_id(&self) -> &str {
        self.participants().0
    }

    /// The provider segment.
    pub fn provider_id(&self) -> &str {
        self.participants().1
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
