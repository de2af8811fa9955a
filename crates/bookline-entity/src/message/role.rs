//! Conversation participant roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The role a message party plays in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    /// The party requesting the service.
    Requester,
    /// The party providing the service.
    Provider,
    /// A platform operator.
    Admin,
    /// Automated platform messages.
    System,
}

impl ParticipantRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requester => "requester",
            Self::Provider => "provider",
            Self::Admin => "admin",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParticipantRole {
    type Err = bookline_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "requester" => Ok(Self::Requester),
            "provider" => Ok(Self::Provider),
            "admin" => Ok(Self::Admin),
            "system" => Ok(Self::System),
            _ => Err(bookline_core::AppError::validation(format!(
                "Invalid participant role: '{s}'. Expected one of: requester, provider, admin, system"
            ))),
        }
    }
}
