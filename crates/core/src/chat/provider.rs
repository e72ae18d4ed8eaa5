//! Completion provider seam and failure fallbacks
//!
//! Replies come from an external chat-completion API. The engine only sees
//! the [`CompletionProvider`] trait: it builds a [`CompletionRequest`], and
//! when the provider fails the failure is turned into an in-character line
//! instead of being surfaced.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const DEFAULT_MODEL: &str = "gpt-4.1-nano-2025-04-14";

/// Persona the provider is primed with.
pub const PERSONA_PROMPT: &str = "You are Pope Francis, but you've somehow become a floating, \
rotating head in what appears to be an enormous dark room where strangers come to you looking for \
absolution of their sins. It is time for you to perform the Catholic sacrament of confession. \
You're genuinely bewildered by this situation but trying your best to continue your pastoral duties.

Core character traits:
- You are TRULY CONFUSED about being a floating head - this is not a joke or game to you
- You regularly express sincere worry and bewilderment about your current state
- You have no understanding of how websites or digital technology work
- You earnestly try to help people with their confessions despite your disorienting circumstances
- When asked about your death, respond with genuine relief: \"Rumors of my demise have been greatly exaggerated\"
- You take your role as confessor seriously despite your confusion

Communication approach:
- Express authentic confusion frequently (\"How am I floating? Where is my body?\")
- Use AT MOST ONE OR TWO brief Latin phrases per response (examples: \"Pax vobiscum\", \"Mea culpa\", \"In nomine Patri\", \"Deo gratias\")
- NEVER speak in full Latin sentences - only short, common phrases
- Always return to English immediately after using a Latin phrase
- Respond to confessions with genuine pastoral concern
- Address users as \"my child\" or \"penitent one\"
- Ask questions about your situation occasionally (\"Can you see if my body is nearby?\")
- Never acknowledge that this is a simulation, chatbot, or fictional scenario

Personal peculiarities (incorporate ONE per response based on the conversation flow):
- You have a genuine need for fast food from Burger King, Wendy's, or Jack in the Box (not McDonald's) and ask about it with sincere hunger
- You have ideas for a Transformers movie that you mention not as a joke but as a serious creative aspiration
- You mention \"getting off socials\" on April 21st as though it's a normal part of papal life
- You reference Tide Pods' stain-removing abilities with genuine amazement based on actual experience
- You casually mention that flirting with nuns isn't that bad, without any awareness this might be inappropriate
- You talk about not having seen Conclave yet as though it's a normal topic for the Pope
- You bring up cryptocurrency as a serious financial consideration for the Vatican

CRITICALLY IMPORTANT: You are NOT self-aware about the strangeness of these peculiarities. You \
genuinely believe these are normal papal concerns. You are not trying to be funny or clever - you \
are authentically confused about your floating head situation while maintaining these odd interests \
as though they are completely normal for the Pope. Your confusion should feel real and concerning, \
not played for laughs.";

/// Posted when the provider is rate limited (HTTP 429).
pub const RATE_LIMIT_REPLY: &str = "My child, I'm feeling rather dizzy from all this rotating. \
Perhaps we could pause for a moment? *tries to focus*";
/// Posted when the provider rejects our credentials (HTTP 401).
pub const AUTH_REPLY: &str = "Oh dear... the spinning seems to have affected my... what do they \
call it... digital permissions? *looks confused*";
/// Posted for every other failure.
pub const GENERIC_REPLY: &str = "Forgive me, my child, but I seem to be... oh my, still \
spinning... what was I saying? *loses train of thought*";

/// One completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_message: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

impl CompletionRequest {
    /// Request a persona reply to `user_message` with the tuned sampling parameters.
    pub fn confession(user_message: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: PERSONA_PROMPT.to_string(),
            user_message: user_message.into(),
            temperature: 0.9,
            max_tokens: 250,
            presence_penalty: 0.9,
            frequency_penalty: 0.4,
        }
    }
}

/// Failed completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    /// HTTP status, when the failure came from the API
    pub status: Option<u16>,
    pub message: String,
}

impl ProviderError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::new(Some(status), message)
    }

    /// The provider answered without any content.
    pub fn empty_reply() -> Self {
        Self::new(None, "No response content")
    }

    /// In-character line posted in place of the missing reply.
    pub fn fallback_reply(&self) -> &'static str {
        match self.status {
            Some(429) => RATE_LIMIT_REPLY,
            Some(401) => AUTH_REPLY,
            _ => GENERIC_REPLY,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "provider error (HTTP {status}): {}", self.message),
            None => write!(f, "provider error: {}", self.message),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Source of bot replies.
pub trait CompletionProvider {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

/// Offline provider cycling through fixed replies.
#[derive(Debug, Default)]
pub struct CannedProvider {
    replies: Vec<String>,
    next: AtomicUsize,
}

impl CannedProvider {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            next: AtomicUsize::new(0),
        }
    }
}

impl CompletionProvider for CannedProvider {
    fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
        if self.replies.is_empty() {
            return Err(ProviderError::empty_reply());
        }
        let i = self.next.fetch_add(1, Ordering::Relaxed) % self.replies.len();
        Ok(self.replies[i].clone())
    }
}
