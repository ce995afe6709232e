//! Read-only festival schedule for visitors.

use tracing::debug;

use crate::event::Event;
use crate::schedule::{ScheduleStore, sort_for_display};
use crate::storage::{SCHEDULE_KEY, Storage, StorageChange};
use crate::tags::dedupe_tags;

/// Shown in place of the cards when there is nothing scheduled.
pub const EMPTY_SCHEDULE_MESSAGE: &str = "Schedule coming soon.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCard {
    pub day: String,
    pub time: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl From<&Event> for ScheduleCard {
    fn from(event: &Event) -> Self {
        let tags = dedupe_tags(&event.tags);
        if tags.len() != event.tags.len() {
            debug!(id = %event.id, "Dropped duplicate tags from card");
        }

        ScheduleCard {
            day: event.day.clone(),
            time: event.time.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            tags,
        }
    }
}

pub struct PublicSchedule<S: Storage> {
    store: ScheduleStore<S>,
    cards: Vec<ScheduleCard>,
}

impl<S: Storage> PublicSchedule<S> {
    pub fn new(storage: S) -> Self {
        PublicSchedule {
            store: ScheduleStore::new(storage),
            cards: Vec::new(),
        }
    }

    /// Re-read the stored schedule and rebuild the cards in display order.
    pub fn load(&mut self) -> &[ScheduleCard] {
        self.cards = sort_for_display(&self.store.load())
            .iter()
            .map(ScheduleCard::from)
            .collect();
        &self.cards
    }

    pub fn cards(&self) -> &[ScheduleCard] {
        &self.cards
    }

    /// Reload when another writer changed the schedule. Returns whether it did.
    pub fn on_change(&mut self, change: &StorageChange) -> bool {
        if change.key != SCHEDULE_KEY {
            return false;
        }
        self.load();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageWatcher, TAGS_KEY};

    #[test]
    fn test_cards_follow_display_order() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                SCHEDULE_KEY,
                r#"[
                    {"id": "b", "day": "Saturday", "time": "9:00 AM", "title": "B", "description": "b"},
                    {"id": "a", "day": "Friday", "time": "7:30 PM", "title": "A", "description": "a"},
                    {"id": "c", "day": "Friday", "time": "10:00 AM", "title": "C", "description": "c"}
                ]"#,
            )
            .unwrap();

        let mut public = PublicSchedule::new(storage);
        let titles: Vec<&str> = public.load().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_empty_schedule_has_no_cards() {
        let storage = MemoryStorage::new();
        storage.set_item(SCHEDULE_KEY, "[]").unwrap();

        let mut public = PublicSchedule::new(storage);
        assert!(public.load().is_empty());
    }

    #[test]
    fn test_missing_schedule_shows_defaults() {
        let mut public = PublicSchedule::new(MemoryStorage::new());
        assert_eq!(public.load().len(), 3);
        assert_eq!(public.cards()[0].title, "Emerging Voices Summit");
    }

    #[test]
    fn test_reloads_only_on_schedule_changes() {
        let storage = MemoryStorage::new();
        let admin_tab = storage.open_tab();
        let mut watcher = storage.subscribe();
        let mut public = PublicSchedule::new(storage);
        public.load();

        admin_tab.set_item(TAGS_KEY, r#"["Talk"]"#).unwrap();
        admin_tab
            .set_item(
                SCHEDULE_KEY,
                r#"[{"id": "x", "day": "Sunday", "time": "1:00 PM", "title": "Closing", "description": "Bye", "tags": ["Talk"]}]"#,
            )
            .unwrap();

        let reloaded: Vec<bool> = watcher
            .poll()
            .iter()
            .map(|change| public.on_change(change))
            .collect();

        assert_eq!(reloaded, vec![false, true]);
        assert_eq!(public.cards().len(), 1);
        assert_eq!(public.cards()[0].tags, vec!["Talk"]);
    }
}
