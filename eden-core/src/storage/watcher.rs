//! Snapshot-diffing watcher that works over any `Storage`.

use std::collections::HashMap;

use tracing::warn;

use super::{Storage, StorageChange, StorageWatcher};

/// Re-reads a fixed set of keys on every poll and reports the ones whose
/// raw value differs from the last snapshot.
pub struct PollingWatcher<S: Storage> {
    storage: S,
    snapshot: HashMap<String, Option<String>>,
    keys: Vec<String>,
}

impl<S: Storage> PollingWatcher<S> {
    pub fn new(storage: S, keys: &[&str]) -> Self {
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let snapshot = keys
            .iter()
            .map(|key| (key.clone(), read(&storage, key)))
            .collect();

        PollingWatcher {
            storage,
            snapshot,
            keys,
        }
    }
}

fn read<S: Storage>(storage: &S, key: &str) -> Option<String> {
    match storage.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Unable to read watched storage key");
            None
        }
    }
}

impl<S: Storage> StorageWatcher for PollingWatcher<S> {
    fn poll(&mut self) -> Vec<StorageChange> {
        let mut changes = Vec::new();

        for key in &self.keys {
            let current = read(&self.storage, key);
            let previous = self.snapshot.get(key).cloned().flatten();
            if current != previous {
                changes.push(StorageChange {
                    key: key.clone(),
                    old_value: previous,
                    new_value: current.clone(),
                });
                self.snapshot.insert(key.clone(), current);
            }
        }

        changes
    }

    fn acknowledge(&mut self, key: &str, value: Option<&str>) {
        if self.snapshot.contains_key(key) {
            self.snapshot
                .insert(key.to_string(), value.map(String::from));
        }
    }
}
