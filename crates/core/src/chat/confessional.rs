//! The confessional conversation service
//!
//! Messages from the Penitent schedule a reply job; jobs are drained by
//! [`Confessional::run_pending_replies`], which asks the provider for a
//! reply and posts it, or posts the matching fallback line when the
//! provider fails.

use super::identity::{KeyValueStore, UserIdentity};
use super::message::{Author, Message, MessageId, OwnerId};
use super::provider::{CompletionProvider, CompletionRequest, ProviderError};
use super::store::MessageStore;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Line posted the first time a visitor arrives.
pub const WELCOME_MESSAGE: &str =
    "Welcome, Penitent One, how many weeks has it been since your last confession?";

/// A reply owed to a Penitent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyJob {
    pub user_message: String,
    pub owner: Option<OwnerId>,
}

pub struct Confessional<S, P> {
    store: S,
    provider: P,
    pending: VecDeque<ReplyJob>,
}

impl<S: MessageStore, P: CompletionProvider> Confessional<S, P> {
    pub fn new(store: S, provider: P) -> Self {
        Self {
            store,
            provider,
            pending: VecDeque::new(),
        }
    }

    /// Append a message; a Penitent message also schedules a reply.
    pub fn send(&mut self, body: impl Into<String>, author: Author, owner: Option<OwnerId>) -> MessageId {
        let body = body.into();
        if author == Author::Penitent {
            self.pending.push_back(ReplyJob {
                user_message: body.clone(),
                owner: owner.clone(),
            });
            debug!("Scheduled reply job ({} pending)", self.pending.len());
        }
        self.store.append(author, body, owner)
    }

    /// Post a message as the bot without scheduling anything.
    pub fn post_bot_message(&mut self, body: impl Into<String>, owner: Option<OwnerId>) -> MessageId {
        self.store.append(Author::Pope, body.into(), owner)
    }

    /// Run every scheduled reply job in order, returning how many ran.
    pub fn run_pending_replies(&mut self) -> usize {
        let mut ran = 0;
        while let Some(job) = self.pending.pop_front() {
            let request = CompletionRequest::confession(job.user_message);
            let body = match self.provider.complete(&request) {
                Ok(reply) if !reply.trim().is_empty() => reply,
                Ok(_) => Self::fallback(&ProviderError::empty_reply()),
                Err(e) => Self::fallback(&e),
            };
            self.post_bot_message(body, job.owner);
            ran += 1;
        }
        debug!("Ran {} reply jobs", ran);
        ran
    }

    fn fallback(error: &ProviderError) -> String {
        warn!("Completion failed, posting fallback: {}", error);
        error.fallback_reply().to_string()
    }

    /// Post the welcome line unless this identity has already seen it.
    pub fn greet<K: KeyValueStore + ?Sized>(
        &mut self,
        identity: &mut UserIdentity,
        storage: &mut K,
    ) -> Option<MessageId> {
        if identity.welcome_shown {
            return None;
        }
        let id = self.post_bot_message(WELCOME_MESSAGE, Some(identity.user_id.clone()));
        identity.mark_welcome_shown(storage);
        Some(id)
    }

    /// Remove the owner's conversation (`None` clears everything).
    pub fn clear(&mut self, owner: Option<&OwnerId>) -> usize {
        self.store.clear(owner)
    }

    pub fn messages(&self, owner: Option<&OwnerId>) -> Vec<Message> {
        self.store.list(owner)
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
