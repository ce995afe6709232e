//! In-memory storage shared between "tabs".
//!
//! Every `MemoryStorage` handle created with [`MemoryStorage::open_tab`]
//! sees the same items, and watchers only hear about writes made through
//! a different handle, the way a browser storage event skips the tab that
//! wrote the value.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{Storage, StorageChange, StorageWatcher};
use crate::error::{EdenError, EdenResult};

#[derive(Default)]
struct Shared {
    items: HashMap<String, String>,
    subscribers: Vec<(usize, Sender<StorageChange>)>,
    rejected_keys: HashSet<String>,
    next_tab: usize,
}

#[derive(Clone)]
pub struct MemoryStorage {
    shared: Arc<Mutex<Shared>>,
    tab: usize,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        let shared = Shared {
            next_tab: 1,
            ..Shared::default()
        };
        MemoryStorage {
            shared: Arc::new(Mutex::new(shared)),
            tab: 0,
        }
    }

    /// Another handle on the same items, acting as a separate tab.
    pub fn open_tab(&self) -> MemoryStorage {
        let mut shared = self.lock();
        let tab = shared.next_tab;
        shared.next_tab += 1;
        MemoryStorage {
            shared: Arc::clone(&self.shared),
            tab,
        }
    }

    /// Watch for writes made through other tabs.
    pub fn subscribe(&self) -> MemoryWatcher {
        let (sender, receiver) = mpsc::channel();
        self.lock().subscribers.push((self.tab, sender));
        MemoryWatcher { receiver }
    }

    /// Make every write to `key` fail, as a full quota would.
    pub fn reject_writes(&self, key: &str) {
        self.lock().rejected_keys.insert(key.to_string());
    }

    pub fn accept_writes(&self, key: &str) {
        self.lock().rejected_keys.remove(key);
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn notify(&self, shared: &mut Shared, change: StorageChange) {
        let tab = self.tab;
        shared.subscribers.retain(|(subscriber_tab, sender)| {
            *subscriber_tab == tab || sender.send(change.clone()).is_ok()
        });
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> EdenResult<Option<String>> {
        Ok(self.lock().items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> EdenResult<()> {
        let mut shared = self.lock();
        if shared.rejected_keys.contains(key) {
            return Err(EdenError::Storage(format!(
                "Quota exceeded while writing '{}'",
                key
            )));
        }

        let old_value = shared.items.insert(key.to_string(), value.to_string());
        if old_value.as_deref() != Some(value) {
            let change = StorageChange {
                key: key.to_string(),
                old_value,
                new_value: Some(value.to_string()),
            };
            self.notify(&mut shared, change);
        }
        Ok(())
    }
}

/// Channel-backed watcher returned by [`MemoryStorage::subscribe`].
pub struct MemoryWatcher {
    receiver: Receiver<StorageChange>,
}

impl StorageWatcher for MemoryWatcher {
    fn poll(&mut self) -> Vec<StorageChange> {
        self.receiver.try_iter().collect()
    }
}
