//! Message storage

use super::message::{Author, Message, MessageId, OwnerId};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Conversation storage.
///
/// Passing `None` as the owner addresses every message, matching clients
/// that predate per-owner conversations.
pub trait MessageStore {
    /// Messages in insertion order.
    fn list(&self, owner: Option<&OwnerId>) -> Vec<Message>;

    fn append(&mut self, author: Author, body: String, owner: Option<OwnerId>) -> MessageId;

    /// Remove messages, returning how many were removed.
    fn clear(&mut self, owner: Option<&OwnerId>) -> usize;
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: BTreeMap<MessageId, Message>,
    by_owner: FxHashMap<OwnerId, Vec<MessageId>>,
    next_id: u64,
}

impl InMemoryMessageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl MessageStore for InMemoryMessageStore {
    fn list(&self, owner: Option<&OwnerId>) -> Vec<Message> {
        match owner {
            None => self.messages.values().cloned().collect(),
            Some(owner) => self
                .by_owner
                .get(owner)
                .map(|ids| ids.iter().filter_map(|id| self.messages.get(id).cloned()).collect())
                .unwrap_or_default(),
        }
    }

    fn append(&mut self, author: Author, body: String, owner: Option<OwnerId>) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;

        if let Some(owner) = &owner {
            self.by_owner.entry(owner.clone()).or_default().push(id);
        }
        self.messages.insert(
            id,
            Message {
                id,
                creation_time_ms: now_ms(),
                author,
                body,
                owner,
            },
        );
        id
    }

    fn clear(&mut self, owner: Option<&OwnerId>) -> usize {
        match owner {
            None => {
                let removed = self.messages.len();
                self.messages.clear();
                self.by_owner.clear();
                removed
            }
            Some(owner) => {
                let ids = self.by_owner.remove(owner).unwrap_or_default();
                ids.iter().filter(|id| self.messages.remove(*id).is_some()).count()
            }
        }
    }
}
