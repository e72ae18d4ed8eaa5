//! Browser-local user identity
//!
//! A visitor is identified by a random id kept in local key-value storage,
//! plus a flag recording whether the welcome line was already shown.

use super::message::OwnerId;
use rand::Rng;
use rustc_hash::FxHashMap;

pub const USER_ID_KEY: &str = "popeUserId";
pub const WELCOME_SHOWN_KEY: &str = "popeWelcomeShown";

/// Local string storage (the browser's `localStorage` in production).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: FxHashMap<String, String>,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Random RFC 4122 version 4 UUID in canonical hyphenated form.
pub fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes: [u8; 16] = rng.random();
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: OwnerId,
    /// The id was generated on this load
    pub is_new_user: bool,
    pub welcome_shown: bool,
}

impl UserIdentity {
    /// Read the identity from `store`, creating and persisting one if absent.
    pub fn load<K, R>(store: &mut K, rng: &mut R) -> Self
    where
        K: KeyValueStore + ?Sized,
        R: Rng + ?Sized,
    {
        match store.get(USER_ID_KEY) {
            Some(id) => Self {
                user_id: OwnerId(id),
                is_new_user: false,
                welcome_shown: store.get(WELCOME_SHOWN_KEY).as_deref() == Some("true"),
            },
            None => {
                let id = random_uuid(rng);
                store.set(USER_ID_KEY, &id);
                Self {
                    user_id: OwnerId(id),
                    is_new_user: true,
                    welcome_shown: false,
                }
            }
        }
    }

    pub fn mark_welcome_shown<K: KeyValueStore + ?Sized>(&mut self, store: &mut K) {
        store.set(WELCOME_SHOWN_KEY, "true");
        self.welcome_shown = true;
    }

    pub fn clear_welcome_flag<K: KeyValueStore + ?Sized>(&mut self, store: &mut K) {
        store.remove(WELCOME_SHOWN_KEY);
        self.welcome_shown = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uuid_format() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..50 {
            let id = random_uuid(&mut rng);
            assert_eq!(id.len(), 36);
            let groups: Vec<&str> = id.split('-').collect();
            assert_eq!(groups.iter().map(|g| g.len()).collect::<Vec<_>>(), [8, 4, 4, 4, 12]);
            assert!(groups[2].starts_with('4'));
            assert!(matches!(groups[3].as_bytes()[0], b'8' | b'9' | b'a' | b'b'));
        }
    }

    #[test]
    fn test_identity_is_stable_across_loads() {
        let mut store = MemoryKeyValueStore::new();
        let mut rng = StdRng::seed_from_u64(1);

        let first = UserIdentity::load(&mut store, &mut rng);
        assert!(first.is_new_user);
        assert!(!first.welcome_shown);

        let second = UserIdentity::load(&mut store, &mut rng);
        assert!(!second.is_new_user);
        assert_eq!(second.user_id, first.user_id);
    }

    #[test]
    fn test_welcome_flag_persists() {
        let mut store = MemoryKeyValueStore::new();
        let mut rng = StdRng::seed_from_u64(2);

        let mut identity = UserIdentity::load(&mut store, &mut rng);
        identity.mark_welcome_shown(&mut store);
        assert_eq!(store.get(WELCOME_SHOWN_KEY).as_deref(), Some("true"));
        assert!(UserIdentity::load(&mut store, &mut rng).welcome_shown);

        identity.clear_welcome_flag(&mut store);
        assert!(!UserIdentity::load(&mut store, &mut rng).welcome_shown);
    }
}
