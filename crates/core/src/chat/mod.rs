//! Confessional chat around the burn effect
//!
//! Storage, identity and the completion API are traits with in-memory
//! implementations; hosts plug in their own backends.

pub mod confession;
pub mod confessional;
pub mod dizzy;
pub mod identity;
pub mod message;
pub mod provider;
pub mod store;

pub use confession::{confession_channel, ConfessionInbox, ConfessionPicker, SinGrade};
pub use confessional::{Confessional, ReplyJob, WELCOME_MESSAGE};
pub use dizzy::{is_default_view, SpinMonitor};
pub use identity::{KeyValueStore, MemoryKeyValueStore, UserIdentity};
pub use message::{Author, Message, MessageId, OwnerId};
pub use provider::{CannedProvider, CompletionProvider, CompletionRequest, ProviderError};
pub use store::{InMemoryMessageStore, MessageStore};
