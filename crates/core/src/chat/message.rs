//! Chat message records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned message id, increasing in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

/// Opaque per-browser owner id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Author {
    /// The user
    #[serde(rename = "the Penitent")]
    Penitent,
    /// The bot
    #[serde(rename = "Pope Francis")]
    Pope,
}

impl Author {
    /// Display name stored with each message
    pub const fn name(self) -> &'static str {
        match self {
            Author::Penitent => "the Penitent",
            Author::Pope => "Pope Francis",
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// Milliseconds since the Unix epoch
    pub creation_time_ms: u64,
    pub author: Author,
    pub body: String,
    /// `None` for messages written before owners existed
    pub owner: Option<OwnerId>,
}
