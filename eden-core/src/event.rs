//! Schedule event type and its normalization.
//!
//! Events come from three places: the stored schedule blob, JSON pasted
//! by an editor, and the event form. All of them go through the same
//! normalization before they are persisted or shown.

use serde::Serialize;
use serde_json::Value;

use crate::tags::{dedupe_tags, parse_tags};

pub const DAY_PLACEHOLDER: &str = "TBA";
pub const TIME_PLACEHOLDER: &str = "TBA";
pub const TITLE_PLACEHOLDER: &str = "Untitled Event";
pub const DESCRIPTION_PLACEHOLDER: &str = "Details forthcoming.";

/// A single schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: String,
    pub day: String,
    pub time: String,
    pub title: String,
    pub description: String,
    /// Ordered, case-insensitively unique labels.
    pub tags: Vec<String>,
}

/// Generate a fresh opaque event id.
pub fn new_event_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Event {
    /// Normalize an arbitrary JSON value into an event.
    ///
    /// Missing or blank text fields fall back to placeholders, scalar
    /// fields of the wrong type are coerced to text, and `tags` may be
    /// either an array or a comma-separated string. Values that are not
    /// objects normalize like an empty object.
    pub fn from_value(value: &Value) -> Event {
        let empty = serde_json::Map::new();
        let map = value.as_object().unwrap_or(&empty);

        let id = map
            .get("id")
            .and_then(scalar_text)
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(new_event_id);

        let tags = match map.get("tags") {
            Some(Value::Array(items)) => dedupe_tags(items.iter().filter_map(scalar_text)),
            Some(other) => match scalar_text(other) {
                Some(text) => dedupe_tags(parse_tags(&text)),
                None => Vec::new(),
            },
            None => Vec::new(),
        };

        Event {
            id,
            day: text_or(map.get("day"), DAY_PLACEHOLDER),
            time: text_or(map.get("time"), TIME_PLACEHOLDER),
            title: text_or(map.get("title"), TITLE_PLACEHOLDER),
            description: text_or(map.get("description"), DESCRIPTION_PLACEHOLDER),
            tags,
        }
    }

    /// Return a normalized copy of an already typed event.
    pub fn normalized(&self) -> Event {
        Event {
            id: if self.id.trim().is_empty() {
                new_event_id()
            } else {
                self.id.clone()
            },
            day: trimmed_or(&self.day, DAY_PLACEHOLDER),
            time: trimmed_or(&self.time, TIME_PLACEHOLDER),
            title: trimmed_or(&self.title, TITLE_PLACEHOLDER),
            description: trimmed_or(&self.description, DESCRIPTION_PLACEHOLDER),
            tags: dedupe_tags(&self.tags),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let key = crate::tags::tag_key(tag);
        self.tags.iter().any(|t| t.to_lowercase() == key)
    }
}

/// JSON text of a scalar value; `None` for null, objects and arrays.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_or(value: Option<&Value>, placeholder: &str) -> String {
    let text = value.and_then(scalar_text).unwrap_or_default();
    trimmed_or(&text, placeholder)
}

fn trimmed_or(text: &str, placeholder: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Built-in sample schedule used when nothing valid is stored.
pub fn default_schedule() -> Vec<Event> {
    vec![
        Event {
            id: "emerging-voices".to_string(),
            day: "Thursday".to_string(),
            time: "2:00 PM".to_string(),
            title: "Emerging Voices Summit".to_string(),
            description: "Panel conversation with resident artists on collaborative practice and community impact.".to_string(),
            tags: vec!["Talk".to_string(), "All Ages".to_string()],
        },
        Event {
            id: "riverlight-walk".to_string(),
            day: "Friday".to_string(),
            time: "7:30 PM".to_string(),
            title: "Riverlight Night Walk".to_string(),
            description: "Guided tour of illuminated installations with live soundscapes by Eden composers.".to_string(),
            tags: vec!["Installation".to_string(), "Accessible".to_string()],
        },
        Event {
            id: "family-print-lab".to_string(),
            day: "Saturday".to_string(),
            time: "11:00 AM".to_string(),
            title: "Family Print Lab".to_string(),
            description: "All-ages workshop with master printers. Limited capacity to keep the experience personal.".to_string(),
            tags: vec!["Workshop".to_string(), "Kids".to_string()],
        },
    ]
}
