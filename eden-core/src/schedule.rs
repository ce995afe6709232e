//! The persisted schedule blob.

use std::cmp::Ordering;

use chrono::{NaiveTime, Weekday};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::event::{Event, default_schedule};
use crate::storage::{SCHEDULE_KEY, Storage};

/// Reads and writes the whole schedule under [`SCHEDULE_KEY`].
#[derive(Clone)]
pub struct ScheduleStore<S: Storage> {
    storage: S,
}

impl<S: Storage> ScheduleStore<S> {
    pub fn new(storage: S) -> Self {
        ScheduleStore { storage }
    }

    /// Load the stored schedule, falling back to the built-in defaults when
    /// nothing usable is stored. Never fails.
    pub fn load(&self) -> Vec<Event> {
        let raw = match self.storage.get_item(SCHEDULE_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "Unable to read stored schedule, falling back to defaults");
                None
            }
        };
        parse_schedule(raw.as_deref())
    }

    /// Persist a normalized copy of `events` and return it.
    ///
    /// Storage and serialization failures are logged and swallowed; the
    /// caller keeps working with the returned copy either way.
    pub fn save(&self, events: &[Event]) -> Vec<Event> {
        let normalized: Vec<Event> = events.iter().map(Event::normalized).collect();

        match serde_json::to_string(&normalized) {
            Ok(blob) => match self.storage.set_item(SCHEDULE_KEY, &blob) {
                Ok(()) => debug!(count = normalized.len(), "Saved schedule"),
                Err(e) => error!(error = %e, "Unable to persist schedule to storage"),
            },
            Err(e) => error!(error = %e, "Unable to serialize schedule"),
        }

        normalized
    }

    pub fn reset_to_defaults(&self) -> Vec<Event> {
        self.save(&default_schedule())
    }

    /// Raw stored blob, for change acknowledgement.
    pub fn raw(&self) -> Option<String> {
        self.storage.get_item(SCHEDULE_KEY).ok().flatten()
    }
}

/// Parse a stored schedule blob, normalizing every entry.
pub fn parse_schedule(raw: Option<&str>) -> Vec<Event> {
    let defaults = || -> Vec<Event> { default_schedule().iter().map(Event::normalized).collect() };

    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return defaults(),
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items.iter().map(Event::from_value).collect(),
        Ok(_) => {
            warn!("Stored schedule is not an array, falling back to defaults");
            defaults()
        }
        Err(e) => {
            error!(error = %e, "Unable to parse stored schedule, falling back to defaults");
            defaults()
        }
    }
}

/// Events ordered by day, then by start time.
pub fn sort_for_display(events: &[Event]) -> Vec<Event> {
    let mut sorted = events.to_vec();
    sorted.sort_by(compare_events);
    sorted
}

/// Day rank, then clock time; the raw text only breaks exact ties.
pub fn compare_events(a: &Event, b: &Event) -> Ordering {
    compare_days(&a.day, &b.day)
        .then_with(|| compare_times(&a.time, &b.time))
        .then_with(|| compare_text(&a.day, &b.day))
        .then_with(|| compare_text(&a.time, &b.time))
}

fn weekday_rank(day: &str) -> Option<u32> {
    day.trim()
        .parse::<Weekday>()
        .ok()
        .map(|weekday| weekday.num_days_from_monday())
}

/// Weekday names in week order first, then free-text days alphabetically.
pub fn compare_days(a: &str, b: &str) -> Ordering {
    match (weekday_rank(a), weekday_rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_text(a, b),
    }
}

/// Parse `2:00 PM` or `14:00` style labels.
pub fn parse_clock_time(label: &str) -> Option<NaiveTime> {
    let label = label.trim();
    NaiveTime::parse_from_str(label, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(label, "%H:%M"))
        .ok()
}

/// Clock times chronologically, then free-text times alphabetically.
pub fn compare_times(a: &str, b: &str) -> Ordering {
    match (parse_clock_time(a), parse_clock_time(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_text(a, b),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    crate::tags::compare_tags(a, b)
}
