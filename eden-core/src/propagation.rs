//! Cascading shared-tag renames and removals into events.
//!
//! The registry write and the schedule rewrite are separate writes. If the
//! second one fails the registry and the events disagree until the next
//! successful save; nothing here tries to roll the first one back.

use std::collections::HashSet;

use crate::event::Event;
use crate::tags::{join_tags, normalize_tag, parse_tags, tag_key};

/// Strip `old_tag` from every event and append `replacement` where it was
/// stripped and is not already present.
///
/// Returns `None` when no event carried the tag.
pub fn cascade_tag_change(
    events: &[Event],
    old_tag: &str,
    replacement: Option<&str>,
) -> Option<Vec<Event>> {
    let old_key = tag_key(old_tag);
    if old_key.is_empty() {
        return None;
    }

    let replacement = replacement.map(normalize_tag).filter(|r| !r.is_empty());
    let mut changed = false;

    let updated = events
        .iter()
        .map(|event| {
            let mut tags: Vec<String> = event
                .tags
                .iter()
                .filter(|t| t.to_lowercase() != old_key)
                .cloned()
                .collect();
            if tags.len() == event.tags.len() {
                return event.clone();
            }

            changed = true;
            if let Some(replacement) = &replacement {
                let replacement_key = replacement.to_lowercase();
                if !tags.iter().any(|t| t.to_lowercase() == replacement_key) {
                    tags.push(replacement.clone());
                }
            }

            Event {
                tags,
                ..event.clone()
            }
        })
        .collect();

    changed.then_some(updated)
}

/// Apply the same change to an in-progress comma-separated tags field.
///
/// The replacement takes the slot of the first stripped occurrence and
/// repeats are dropped. Returns `None` when the field did not mention the tag.
pub fn apply_tag_change_to_input(
    input: &str,
    old_tag: &str,
    replacement: Option<&str>,
) -> Option<String> {
    let old_key = tag_key(old_tag);
    if old_key.is_empty() {
        return None;
    }

    let replacement = replacement.map(normalize_tag).filter(|r| !r.is_empty());
    let mut seen = HashSet::new();
    let mut updated = Vec::new();
    let mut changed = false;

    for tag in parse_tags(input) {
        let key = tag.to_lowercase();
        if key == old_key {
            changed = true;
            if let Some(replacement) = &replacement
                && seen.insert(replacement.to_lowercase())
            {
                updated.push(replacement.clone());
            }
            continue;
        }
        if seen.insert(key) {
            updated.push(tag);
        }
    }

    changed.then(|| join_tags(&updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, tags: &[&str]) -> Event {
        Event {
            id: id.to_string(),
            day: "Friday".to_string(),
            time: "7:30 PM".to_string(),
            title: id.to_string(),
            description: "d".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_rename_cascades_without_duplicates() {
        let events = vec![
            event("a", &["Talk", "Kids"]),
            event("b", &["talk", "Discussion"]),
            event("c", &["Workshop"]),
        ];

        let updated = cascade_tag_change(&events, "Talk", Some("Discussion")).unwrap();

        assert_eq!(updated[0].tags, vec!["Kids", "Discussion"]);
        assert_eq!(updated[1].tags, vec!["Discussion"]);
        assert_eq!(updated[2], events[2]);
    }

    #[test]
    fn test_removal_strips_tag() {
        let events = vec![event("a", &["Talk", "Kids"])];

        let updated = cascade_tag_change(&events, "KIDS", None).unwrap();
        assert_eq!(updated[0].tags, vec!["Talk"]);

        let blank = cascade_tag_change(&events, "kids", Some("  ")).unwrap();
        assert_eq!(blank[0].tags, vec!["Talk"]);
    }

    #[test]
    fn test_untouched_schedule_reports_none() {
        let events = vec![event("a", &["Talk"])];
        assert!(cascade_tag_change(&events, "Workshop", Some("Lab")).is_none());
        assert!(cascade_tag_change(&events, " ", Some("Lab")).is_none());
    }

    #[test]
    fn test_input_rename_keeps_position() {
        assert_eq!(
            apply_tag_change_to_input("Kids, talk, VIP", "Talk", Some("Discussion")).as_deref(),
            Some("Kids, Discussion, VIP")
        );
    }

    #[test]
    fn test_input_rename_drops_repeats() {
        assert_eq!(
            apply_tag_change_to_input("Talk, Discussion, talk", "talk", Some("discussion"))
                .as_deref(),
            Some("discussion")
        );
    }

    #[test]
    fn test_input_without_tag_is_unchanged() {
        assert_eq!(apply_tag_change_to_input("Kids, VIP", "Talk", None), None);
        assert_eq!(apply_tag_change_to_input("", "Talk", None), None);
    }
}
