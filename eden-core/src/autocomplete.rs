//! Start-time menu and shared-tag chips for the event form.
//!
//! Both are recomputed from the live field value on every render; nothing
//! here caches selection state.

use std::collections::HashSet;

use crate::event::Event;
use crate::schedule::compare_times;
use crate::tags::{join_tags, normalize_tag, parse_tags, tag_key};

/// Default cap on the number of time options shown at once.
pub const DEFAULT_TIME_MENU_LIMIT: usize = 50;

/// `12:00 AM`, `12:30 AM`, ... `11:30 PM`.
pub fn half_hour_times() -> Vec<String> {
    (0..24)
        .flat_map(|hour| [0, 30].map(move |minute| (hour, minute)))
        .map(|(hour, minute)| {
            let period = if hour >= 12 { "PM" } else { "AM" };
            let display_hour = (hour + 11) % 12 + 1;
            format!("{}:{:02} {}", display_hour, minute, period)
        })
        .collect()
}

/// Half-hour labels plus every distinct time already used by an event.
pub fn available_times(events: &[Event]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut times: Vec<String> = half_hour_times()
        .into_iter()
        .chain(events.iter().map(|e| e.time.trim().to_string()))
        .filter(|time| !time.is_empty() && seen.insert(time.clone()))
        .collect();
    times.sort_by(|a, b| compare_times(a, b).then_with(|| a.cmp(b)));
    times
}

/// Case-insensitive substring filter on the trimmed query, capped at `limit`.
pub fn filter_times(available: &[String], query: &str, limit: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    available
        .iter()
        .filter(|time| query.is_empty() || time.to_lowercase().contains(&query))
        .take(limit)
        .cloned()
        .collect()
}

/// Time of the first event held on exactly `day`, to prefill the form.
pub fn time_for_day(events: &[Event], day: &str) -> Option<String> {
    let day = day.trim();
    if day.is_empty() {
        return None;
    }
    events
        .iter()
        .find(|e| e.day == day && !e.time.is_empty())
        .map(|e| e.time.clone())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChip {
    pub label: String,
    pub selected: bool,
}

/// One chip per shared tag, selected when the field already lists it.
pub fn tag_chips(shared: &[String], input: &str) -> Vec<TagChip> {
    let selected: HashSet<String> = parse_tags(input).iter().map(|t| tag_key(t)).collect();
    shared
        .iter()
        .map(|tag| TagChip {
            label: tag.clone(),
            selected: selected.contains(&tag.to_lowercase()),
        })
        .collect()
}

/// Clicking a chip: add the tag when the field lacks it, drop it otherwise.
pub fn toggle_tag(input: &str, tag: &str) -> String {
    let tag = normalize_tag(tag);
    let key = tag.to_lowercase();
    let mut tags = parse_tags(input);

    if key.is_empty() {
        return join_tags(&tags);
    }

    let before = tags.len();
    tags.retain(|t| tag_key(t) != key);
    if tags.len() == before {
        tags.push(tag);
    }
    join_tags(&tags)
}
