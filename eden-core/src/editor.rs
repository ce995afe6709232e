//! Admin editor controller.
//!
//! Owns the working copy of the schedule, the shared tag registry, the
//! event form draft, the tag-suggestion prompt and the JSON text buffer.
//! The two storage blobs are its only durable dependencies; the watcher
//! tells it when another writer changed them.

use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::autocomplete::{
    DEFAULT_TIME_MENU_LIMIT, TagChip, available_times, filter_times, tag_chips, time_for_day,
    toggle_tag,
};
use crate::error::{EdenError, EdenResult};
use crate::event::{Event, default_schedule, new_event_id};
use crate::propagation::{apply_tag_change_to_input, cascade_tag_change};
use crate::prompt::{DEFAULT_PROMPT_DELAY, TagPrompt};
use crate::registry::TagRegistry;
use crate::schedule::{ScheduleStore, sort_for_display};
use crate::storage::{SCHEDULE_KEY, Storage, StorageChange, StorageWatcher, TAGS_KEY};
use crate::tags::{join_tags, normalize_tag, parse_tags, tag_key};
use crate::transfer::{apply_json, export_json};

#[derive(Debug, Clone, Copy)]
pub struct EditorSettings {
    pub prompt_delay: Duration,
    pub time_menu_limit: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        EditorSettings {
            prompt_delay: DEFAULT_PROMPT_DELAY,
            time_menu_limit: DEFAULT_TIME_MENU_LIMIT,
        }
    }
}

/// The event form as typed. `id` is set while editing an existing event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub id: Option<String>,
    pub day: String,
    pub time: String,
    pub title: String,
    pub description: String,
    /// Comma-separated tags field.
    pub tags: String,
}

impl EventForm {
    pub fn from_event(event: &Event) -> Self {
        EventForm {
            id: Some(event.id.clone()),
            day: event.day.clone(),
            time: event.time.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            tags: join_tags(&event.tags),
        }
    }
}

/// What a shared-tag rename or removal touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagChangeOutcome {
    pub registry_changed: bool,
    pub schedule_changed: bool,
    pub form_changed: bool,
}

pub struct AdminEditor<S: Storage + Clone, W: StorageWatcher> {
    store: ScheduleStore<S>,
    registry: TagRegistry<S>,
    watcher: W,
    prompt: TagPrompt,
    settings: EditorSettings,
    events: Vec<Event>,
    form: EventForm,
    json_buffer: String,
}

fn render_json(events: &[Event]) -> String {
    export_json(events).unwrap_or_else(|e| {
        error!(error = %e, "Unable to render schedule JSON");
        String::new()
    })
}

impl<S: Storage + Clone, W: StorageWatcher> AdminEditor<S, W> {
    pub fn open(storage: S, watcher: W, settings: EditorSettings) -> Self {
        let store = ScheduleStore::new(storage.clone());
        let mut registry = TagRegistry::load(storage);
        let events = store.load();

        if !registry.is_primed() {
            registry.add(events.iter().flat_map(|e| e.tags.iter()));
        }

        let mut editor = AdminEditor {
            store,
            registry,
            watcher,
            prompt: TagPrompt::new(settings.prompt_delay),
            settings,
            json_buffer: render_json(&events),
            events,
            form: EventForm::default(),
        };
        editor.acknowledge_own_writes();
        editor
    }

    // SCHEDULE:

    /// Working copy in stored order.
    pub fn schedule(&self) -> &[Event] {
        &self.events
    }

    pub fn sorted_schedule(&self) -> Vec<Event> {
        sort_for_display(&self.events)
    }

    pub fn find(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Save the form. Replaces the event with the same id, or appends.
    pub fn submit(&mut self, form: EventForm) -> EdenResult<Event> {
        let required = [&form.day, &form.time, &form.title, &form.description];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(EdenError::Validation(
                "Day, time, title, and description are required.".to_string(),
            ));
        }

        let id = form
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(new_event_id);
        let event = Event {
            id,
            day: form.day,
            time: form.time,
            title: form.title,
            description: form.description,
            tags: parse_tags(&form.tags),
        }
        .normalized();

        let mut events = self.events.clone();
        match events.iter().position(|e| e.id == event.id) {
            Some(index) => events[index] = event.clone(),
            None => events.push(event.clone()),
        }

        self.commit(&events);
        self.clear_form();
        Ok(event)
    }

    /// Load an event into the form for editing.
    pub fn edit(&mut self, id: &str) -> EdenResult<&EventForm> {
        let form = self
            .find(id)
            .map(EventForm::from_event)
            .ok_or_else(|| EdenError::EventNotFound(id.to_string()))?;
        self.form = form;
        self.prompt.reset();
        Ok(&self.form)
    }

    pub fn delete(&mut self, id: &str) -> EdenResult<Event> {
        let removed = self
            .find(id)
            .cloned()
            .ok_or_else(|| EdenError::EventNotFound(id.to_string()))?;

        let remaining: Vec<Event> = self.events.iter().filter(|e| e.id != id).cloned().collect();
        self.commit(&remaining);
        Ok(removed)
    }

    pub fn reset_to_defaults(&mut self) -> &[Event] {
        self.commit(&default_schedule());
        self.clear_form();
        &self.events
    }

    /// Persist, re-render the JSON buffer and absorb tags into the registry.
    fn commit(&mut self, events: &[Event]) {
        self.events = self.store.save(events);
        self.json_buffer = render_json(&self.events);
        self.registry
            .add(self.events.iter().flat_map(|e| e.tags.iter()));
        self.acknowledge_own_writes();
    }

    // JSON:

    pub fn json_buffer(&self) -> &str {
        &self.json_buffer
    }

    pub fn set_json_buffer(&mut self, text: impl Into<String>) {
        self.json_buffer = text.into();
    }

    /// Refill the JSON buffer from the current schedule.
    pub fn export(&mut self) -> &str {
        self.json_buffer = render_json(&self.events);
        &self.json_buffer
    }

    /// Replace the whole schedule with the events described by `text`.
    /// Nothing changes when the text is rejected.
    pub fn apply_json(&mut self, text: &str) -> EdenResult<&[Event]> {
        let events = apply_json(text)?;
        self.commit(&events);
        Ok(&self.events)
    }

    // SHARED TAGS:

    pub fn shared_tags(&self) -> &[String] {
        self.registry.tags()
    }

    pub fn add_shared_tags<I, T>(&mut self, tags: I) -> bool
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let changed = self.registry.add(tags);
        self.acknowledge_own_writes();
        changed
    }

    /// Rename a shared tag and cascade it into every event and the form.
    /// A blank `new_tag` removes the tag instead.
    pub fn rename_shared_tag(&mut self, old_tag: &str, new_tag: &str) -> EdenResult<TagChangeOutcome> {
        let normalized = normalize_tag(new_tag);
        if normalized.is_empty() {
            return Ok(self.remove_shared_tag(old_tag));
        }

        let new_key = normalized.to_lowercase();
        if new_key != tag_key(old_tag) && self.registry.contains(&new_key) {
            return Err(EdenError::TagConflict(normalized));
        }

        let registry_changed = self.registry.rename(old_tag, &normalized);
        Ok(self.cascade(old_tag, Some(&normalized), registry_changed))
    }

    /// Remove a shared tag from the registry, every event and the form.
    pub fn remove_shared_tag(&mut self, tag: &str) -> TagChangeOutcome {
        let registry_changed = self.registry.remove(tag);
        self.cascade(tag, None, registry_changed)
    }

    fn cascade(&mut self, old_tag: &str, replacement: Option<&str>, registry_changed: bool) -> TagChangeOutcome {
        let mut outcome = TagChangeOutcome {
            registry_changed,
            ..TagChangeOutcome::default()
        };

        if let Some(updated) = cascade_tag_change(&self.events, old_tag, replacement) {
            self.commit(&updated);
            outcome.schedule_changed = true;
        }

        if let Some(tags) = apply_tag_change_to_input(&self.form.tags, old_tag, replacement) {
            self.form.tags = tags;
            outcome.form_changed = true;
        }

        self.acknowledge_own_writes();
        debug!(old_tag, ?replacement, ?outcome, "Cascaded shared tag change");
        outcome
    }

    // FORM:

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EventForm {
        &mut self.form
    }

    pub fn clear_form(&mut self) {
        self.form = EventForm::default();
        self.prompt.reset();
    }

    /// Choosing a day prefills the time used by the first event on it.
    pub fn select_day(&mut self, day: &str) -> Option<String> {
        self.form.day = day.trim().to_string();
        let time = time_for_day(&self.events, &self.form.day)?;
        self.form.time = time.clone();
        Some(time)
    }

    pub fn time_options(&self, query: &str) -> Vec<String> {
        filter_times(
            &available_times(&self.events),
            query,
            self.settings.time_menu_limit,
        )
    }

    pub fn tag_chips(&self) -> Vec<TagChip> {
        tag_chips(self.registry.tags(), &self.form.tags)
    }

    pub fn toggle_chip(&mut self, tag: &str) {
        self.form.tags = toggle_tag(&self.form.tags, tag);
        self.prompt.reset();
    }

    // TAG PROMPT:

    pub fn prompt(&self) -> &TagPrompt {
        &self.prompt
    }

    pub fn tags_input_changed(&mut self, now: Instant, input: &str) {
        self.form.tags = input.to_string();
        self.prompt.on_input(now);
    }

    /// Drive the prompt timer; returns the candidate when it becomes visible.
    pub fn prompt_tick(&mut self, now: Instant) -> Option<String> {
        let registry = &self.registry;
        self.prompt
            .tick(now, &self.form.tags, |key| registry.contains(key))
            .map(String::from)
    }

    /// Add the suggested tag to the registry and canonicalize the field.
    pub fn accept_prompt(&mut self) -> Option<String> {
        let accepted = self.prompt.accept(&self.form.tags)?;
        self.registry.add([&accepted.tag]);
        self.form.tags = accepted.input;
        self.acknowledge_own_writes();
        Some(accepted.tag)
    }

    pub fn dismiss_prompt(&mut self) -> bool {
        self.prompt.dismiss()
    }

    pub fn tags_input_blurred(&mut self) {
        self.prompt.on_blur();
    }

    // STORAGE NOTIFICATIONS:

    /// Re-read whatever another writer changed. Returns the changes seen.
    pub fn poll_storage(&mut self) -> Vec<StorageChange> {
        let changes = self.watcher.poll();

        for change in &changes {
            match change.key.as_str() {
                TAGS_KEY => {
                    self.registry.reload();
                    debug!(count = self.registry.tags().len(), "Reloaded shared tags");
                }
                SCHEDULE_KEY => {
                    self.events = self.store.load();
                    self.json_buffer = render_json(&self.events);
                    debug!(count = self.events.len(), "Reloaded schedule");
                }
                _ => {}
            }
        }

        if !changes.is_empty() {
            self.acknowledge_own_writes();
        }
        changes
    }

    fn acknowledge_own_writes(&mut self) {
        self.watcher
            .acknowledge(SCHEDULE_KEY, self.store.raw().as_deref());
        self.watcher
            .acknowledge(TAGS_KEY, self.registry.raw().as_deref());
    }
}
