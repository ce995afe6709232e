//! JSON export and apply for the whole schedule.

use serde_json::Value;

use crate::error::{EdenError, EdenResult};
use crate::event::Event;

/// File name offered when the schedule is downloaded.
pub const DOWNLOAD_FILE_NAME: &str = "eden-festival-schedule.json";

/// Pretty-printed (two-space indented) JSON array of events.
pub fn export_json(events: &[Event]) -> EdenResult<String> {
    serde_json::to_string_pretty(events).map_err(|e| EdenError::Serialization(e.to_string()))
}

/// Parse user-supplied JSON into a normalized schedule.
///
/// Fails without producing anything when the text is blank, does not
/// parse, or is not a top-level array.
pub fn apply_json(text: &str) -> EdenResult<Vec<Event>> {
    if text.trim().is_empty() {
        return Err(EdenError::Validation(
            "Paste JSON into the field before applying.".to_string(),
        ));
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| EdenError::InvalidJson(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(EdenError::InvalidJson(
            "JSON must describe an array of events.".to_string(),
        ));
    };

    Ok(items.iter().map(Event::from_value).collect())
}
