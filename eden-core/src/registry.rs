//! Shared tag registry.
//!
//! The list of tag labels offered to every editor, stored under
//! [`TAGS_KEY`]. It is kept sorted case-insensitively and unique by
//! case-insensitive key. Membership changes are written back immediately.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::event::{default_schedule, scalar_text};
use crate::storage::{Storage, TAGS_KEY};
use crate::tags::{dedupe_tags, normalize_tag, sort_tags, tag_key};

/// Sorted, deduplicated tags of the built-in sample schedule.
pub fn default_tags() -> Vec<String> {
    let schedule = default_schedule();
    sort_tags(dedupe_tags(schedule.iter().flat_map(|e| e.tags.iter())))
}

pub struct TagRegistry<S: Storage> {
    storage: S,
    tags: Vec<String>,
    /// Whether storage is known to hold a registry blob.
    primed: bool,
}

impl<S: Storage> TagRegistry<S> {
    /// Read the registry, seeding storage with the defaults when the stored
    /// value is missing, unparsable, not an array or empty.
    pub fn load(storage: S) -> Self {
        let mut registry = TagRegistry {
            storage,
            tags: Vec::new(),
            primed: false,
        };
        registry.reload();
        registry
    }

    /// Re-read storage, e.g. after another tab changed the registry.
    pub fn reload(&mut self) {
        match self.storage.get_item(TAGS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Array(items)) if !items.is_empty() => {
                    self.tags = sort_tags(dedupe_tags(items.iter().filter_map(scalar_text)));
                    self.primed = true;
                    return;
                }
                Ok(_) => warn!("Stored shared tags are empty or not an array, seeding defaults"),
                Err(e) => {
                    error!(error = %e, "Unable to parse stored tags, falling back to defaults")
                }
            },
            Ok(None) => debug!("No shared tags stored yet, seeding defaults"),
            Err(e) => error!(error = %e, "Unable to read stored tags, falling back to defaults"),
        }

        self.tags = default_tags();
        self.persist();
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_primed(&self) -> bool {
        self.primed
    }

    pub fn keys(&self) -> HashSet<String> {
        self.tags.iter().map(|t| t.to_lowercase()).collect()
    }

    pub fn contains(&self, tag: &str) -> bool {
        let key = tag_key(tag);
        self.tags.iter().any(|t| t.to_lowercase() == key)
    }

    /// Raw stored blob, for change acknowledgement.
    pub fn raw(&self) -> Option<String> {
        self.storage.get_item(TAGS_KEY).ok().flatten()
    }

    /// Merge tags that are not yet known. Returns whether the set changed.
    pub fn add<I, T>(&mut self, tags: I) -> bool
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut keys = self.keys();
        let mut next = self.tags.clone();
        let mut added = false;

        for tag in tags {
            let normalized = normalize_tag(tag.as_ref());
            if normalized.is_empty() {
                continue;
            }
            if keys.insert(normalized.to_lowercase()) {
                next.push(normalized);
                added = true;
            }
        }

        if !added {
            return false;
        }
        self.replace(next)
    }

    /// Delete a tag by case-insensitive match.
    pub fn remove(&mut self, tag: &str) -> bool {
        let key = tag_key(tag);
        if key.is_empty() || !self.contains(&key) {
            return false;
        }

        let next = self
            .tags
            .iter()
            .filter(|t| t.to_lowercase() != key)
            .cloned()
            .collect();
        self.replace(next)
    }

    /// Rename a tag in place.
    ///
    /// A blank `new_tag` removes `old_tag`. Renaming onto a different tag
    /// that already exists is refused and leaves the registry untouched.
    pub fn rename(&mut self, old_tag: &str, new_tag: &str) -> bool {
        let old_key = tag_key(old_tag);
        if old_key.is_empty() || !self.contains(&old_key) {
            return false;
        }

        let normalized = normalize_tag(new_tag);
        if normalized.is_empty() {
            return self.remove(old_tag);
        }

        let new_key = normalized.to_lowercase();
        if new_key != old_key && self.contains(&new_key) {
            return false;
        }

        let next = self
            .tags
            .iter()
            .map(|t| {
                if t.to_lowercase() == old_key {
                    normalized.clone()
                } else {
                    t.clone()
                }
            })
            .collect();
        self.replace(next)
    }

    fn replace(&mut self, next: Vec<String>) -> bool {
        let next = sort_tags(dedupe_tags(next));
        let changed = next != self.tags;
        self.tags = next;

        if changed || !self.primed {
            self.persist();
        }
        changed
    }

    fn persist(&mut self) {
        let blob = match serde_json::to_string(&self.tags) {
            Ok(blob) => blob,
            Err(e) => {
                error!(error = %e, "Unable to serialize shared tags");
                return;
            }
        };

        match self.storage.set_item(TAGS_KEY, &blob) {
            Ok(()) => self.primed = true,
            Err(e) => error!(error = %e, "Unable to persist shared tags"),
        }
    }
}
