use candy_core::hint::{FlagStore, MemoryStore};
use web_sys as web;

/// `localStorage`-backed flags. Falls back to memory when storage is denied
/// (private mode, sandboxed frames), so the hint still shows at most once
/// per page load.
pub enum BrowserStore {
    Local(web::Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        match web::window().and_then(|w| w.local_storage().ok().flatten()) {
            Some(storage) => BrowserStore::Local(storage),
            None => {
                log::warn!("[hint] localStorage unavailable, using memory");
                BrowserStore::Memory(MemoryStore::default())
            }
        }
    }
}

impl FlagStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            BrowserStore::Local(s) => s.get_item(key).ok().flatten(),
            BrowserStore::Memory(m) => m.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match self {
            BrowserStore::Local(s) => {
                if let Err(e) = s.set_item(key, value) {
                    log::warn!("[hint] could not persist {}: {:?}", key, e);
                }
            }
            BrowserStore::Memory(m) => m.set(key, value),
        }
    }
}
