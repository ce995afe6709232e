//! Key-value blob storage and change notification.
//!
//! The schedule and the shared tags each live under one key as a JSON
//! string. `Storage` is the minimal get/set surface both stores
//! need; `StorageWatcher` is how a front-end learns that *another*
//! writer changed a key, so it can re-read and re-render.

mod file;
mod memory;
mod watcher;

pub use file::FileStorage;
pub use memory::{MemoryStorage, MemoryWatcher};
pub use watcher::PollingWatcher;

use crate::error::EdenResult;

/// Storage key of the schedule blob (JSON array of events).
pub const SCHEDULE_KEY: &str = "edenFestivalSchedule";

/// Storage key of the shared tag registry (JSON array of strings).
pub const TAGS_KEY: &str = "edenFestivalTags";

/// Minimal string key-value store.
pub trait Storage {
    fn get_item(&self, key: &str) -> EdenResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> EdenResult<()>;
}

/// A key changed under another writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Source of storage change notifications.
///
/// Delivery is best-effort and unordered across keys: the last writer wins
/// and a reader only learns that it should re-read.
pub trait StorageWatcher {
    /// Drain the changes observed since the previous call.
    fn poll(&mut self) -> Vec<StorageChange>;

    /// Record a value this reader wrote itself so it is not reported back.
    fn acknowledge(&mut self, _key: &str, _value: Option<&str>) {}
}
