//! First-visit hint scheduling over a tiny persisted flag store.

use crate::constants::HINT_DELAY_SEC;
use fnv::FnvHashMap;

/// Key under which the "hint already shown" flag is persisted.
pub const HINT_SEEN_KEY: &str = "emotionCandyHintSeen";

/// String key/value persistence (browser `localStorage` on the web).
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory store; also stands in when the browser denies storage access.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FnvHashMap<String, String>,
}

impl FlagStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Opens the hint once, a fixed delay after load, unless the flag says it was
/// already seen. The flag is read once at construction and written when the
/// hint is first displayed.
#[derive(Clone, Debug)]
pub struct HintScheduler {
    key: &'static str,
    due_at: Option<f64>,
}

impl HintScheduler {
    pub fn new(store: &dyn FlagStore, now_sec: f64) -> Self {
        Self::with_key(store, HINT_SEEN_KEY, now_sec)
    }

    pub fn with_key(store: &dyn FlagStore, key: &'static str, now_sec: f64) -> Self {
        let due_at = if store.has(key) {
            None
        } else {
            Some(now_sec + HINT_DELAY_SEC)
        };
        Self { key, due_at }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }

    /// Returns `true` exactly once, on the first poll at or after the due time,
    /// and marks the flag.
    pub fn poll(&mut self, store: &mut dyn FlagStore, now_sec: f64) -> bool {
        match self.due_at {
            Some(due) if now_sec >= due => {
                self.due_at = None;
                store.set(self.key, "true");
                log::info!("[hint] first visit, showing hint");
                true
            }
            _ => false,
        }
    }
}
