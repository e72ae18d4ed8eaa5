//! Chat and absolve flow around the burn effect
//!
//! Run tests with: cargo test --test `confessional_flow`

use absolution_fx_core::{
    chat::{
        confession_channel,
        provider::{GENERIC_REPLY, RATE_LIMIT_REPLY},
        Author, CannedProvider, CompletionProvider, CompletionRequest, Confessional,
        InMemoryMessageStore, MemoryKeyValueStore, ProviderError, SinGrade, SpinMonitor,
        UserIdentity, WELCOME_MESSAGE,
    },
    scene::{AbsolveTransition, Cleared, BURN_DURATION},
    DisplaySurface, FireEffectScene, FireOverlay, SceneConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::time::Duration;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Replays scripted results, then fails generically
struct ScriptedProvider {
    script: RefCell<Vec<Result<String, ProviderError>>>,
    seen: RefCell<Vec<String>>,
}

impl ScriptedProvider {
    fn new(mut script: Vec<Result<String, ProviderError>>) -> Self {
        script.reverse();
        Self {
            script: RefCell::new(script),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl CompletionProvider for ScriptedProvider {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.seen.borrow_mut().push(request.user_message.clone());
        self.script
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| Err(ProviderError::new(None, "script exhausted")))
    }
}

struct Surface;

impl DisplaySurface for Surface {
    fn size(&self) -> (u32, u32) {
        (390, 844)
    }

    fn present(&mut self, _scene: &FireEffectScene) {}
}

#[test]
fn test_rate_limited_reply_posts_fallback() {
    let provider = ScriptedProvider::new(vec![Err(ProviderError::http(429, "Too Many Requests"))]);
    let mut chat = Confessional::new(InMemoryMessageStore::new(), provider);
    let mut storage = MemoryKeyValueStore::new();
    let identity = UserIdentity::load(&mut storage, &mut StdRng::seed_from_u64(5));
    let owner = Some(identity.user_id.clone());

    chat.send("I observed the Sabbath day on a Wednesday", Author::Penitent, owner.clone());
    assert_eq!(chat.pending_replies(), 1);
    chat.run_pending_replies();
    assert_eq!(chat.pending_replies(), 0);

    let messages = chat.messages(owner.as_ref());
    let reply = messages
        .iter()
        .find(|m| m.author == Author::Pope)
        .expect("a bot message follows");
    assert_eq!(reply.body, RATE_LIMIT_REPLY);
}

#[test]
fn test_replies_follow_send_order() {
    let provider = ScriptedProvider::new(vec![
        Ok("Pax vobiscum, my child".to_string()),
        Err(ProviderError::http(503, "unavailable")),
    ]);
    let mut chat = Confessional::new(InMemoryMessageStore::new(), provider);

    chat.send("first", Author::Penitent, None);
    chat.send("second", Author::Penitent, None);
    assert_eq!(chat.run_pending_replies(), 2);
    // Each request carries only its own message
    assert_eq!(*chat.provider().seen.borrow(), ["first", "second"]);

    let bodies: Vec<String> = chat.messages(None).into_iter().map(|m| m.body).collect();
    assert_eq!(bodies, ["first", "second", "Pax vobiscum, my child", GENERIC_REPLY]);
}

#[test]
fn test_welcome_then_absolve_clears_conversation() {
    let mut storage = MemoryKeyValueStore::new();
    let mut rng = StdRng::seed_from_u64(9);
    let mut identity = UserIdentity::load(&mut storage, &mut rng);
    let owner = identity.user_id.clone();

    let mut chat = Confessional::new(InMemoryMessageStore::new(), CannedProvider::new(["Deo gratias"]));
    chat.greet(&mut identity, &mut storage);
    chat.send("I got a tattoo", Author::Penitent, Some(owner.clone()));
    chat.run_pending_replies();
    assert_eq!(chat.messages(Some(&owner)).len(), 3);
    assert_eq!(chat.messages(Some(&owner))[0].body, WELCOME_MESSAGE);

    let mut overlay = FireOverlay::new(SceneConfig {
        seed: Some(3),
        ..SceneConfig::default()
    });
    let mut absolve = AbsolveTransition::default();
    let start = Duration::from_secs(100);

    absolve.request();
    absolve.confirm(start, &mut overlay, &Surface).unwrap();
    assert!(overlay.is_mounted());
    assert!(overlay.on_frame(0.016, &mut Surface));

    let mut cleared = None;
    for frame in 1..=200 {
        let now = start + Duration::from_millis(frame * 16);
        if let Some(done) = absolve.update(now, &mut overlay) {
            cleared = Some((done, now - start));
            break;
        }
    }
    let (done, elapsed) = cleared.expect("burn finishes");
    assert_eq!(done, Cleared);
    assert!(elapsed >= BURN_DURATION);
    assert!(!overlay.is_mounted());

    chat.clear(Some(&owner));
    assert!(chat.messages(Some(&owner)).is_empty());

    // A returning visitor is not welcomed twice
    let mut again = UserIdentity::load(&mut storage, &mut rng);
    assert_eq!(again.user_id, owner);
    assert!(chat.greet(&mut again, &mut storage).is_none());
}

#[test]
fn test_confession_reaches_input() {
    let (picker, inbox) = confession_channel();
    let picker_thread = std::thread::spawn(move || {
        picker.pick(SinGrade::Venial, 1);
        picker.pick(SinGrade::Venial, 8);
    });
    picker_thread.join().unwrap();
    assert_eq!(inbox.latest().as_deref(), Some("I never got to say \"I love you\""));
}

#[test]
fn test_spinning_head_complains_into_chat() {
    let mut chat = Confessional::new(InMemoryMessageStore::new(), CannedProvider::default());
    let mut monitor = SpinMonitor::default();

    for frame in 0..60_u64 {
        let azimuth = frame as f32 * 0.2;
        if let Some(line) = monitor.sample(azimuth, Duration::from_millis(frame * 16)) {
            chat.post_bot_message(line, None);
        }
    }

    let messages = chat.messages(None);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].author, Author::Pope);
}
