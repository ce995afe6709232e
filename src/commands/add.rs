use std::time::Instant;

use anyhow::Result;
use clap::Args;
use dialoguer::{Completion, Confirm, Input};
use eden_core::autocomplete::{available_times, filter_times};
use eden_core::editor::AdminEditor;
use eden_core::storage::{Storage, StorageWatcher};
use owo_colors::OwoColorize;

use crate::commands::Context;
use crate::render::render_chips;

#[derive(Args, Default)]
pub struct EventFields {
    /// Day, e.g. "Friday"
    #[arg(short, long)]
    pub day: Option<String>,

    /// Start time, e.g. "7:30 PM"
    #[arg(short, long)]
    pub time: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
}

impl EventFields {
    fn is_empty(&self) -> bool {
        self.day.is_none()
            && self.time.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.tags.is_none()
    }

    fn is_complete(&self) -> bool {
        self.day.is_some() && self.time.is_some() && self.title.is_some() && self.description.is_some()
    }
}

pub fn run(ctx: &Context, fields: EventFields) -> Result<()> {
    let mut editor = ctx.editor();
    let interactive = !fields.is_complete();

    fill_form(&mut editor, fields, interactive)?;
    let event = editor.submit(editor.form().clone())?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Added: {} ({})", event.title, event.id).green());
    Ok(())
}

pub fn run_edit(ctx: &Context, id: &str, fields: EventFields) -> Result<()> {
    let mut editor = ctx.editor();
    editor.edit(id)?;
    let interactive = fields.is_empty();

    fill_form(&mut editor, fields, interactive)?;
    let event = editor.submit(editor.form().clone())?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Updated: {}", event.title).green());
    Ok(())
}

/// Copy given fields into the editor's form, prompting for the rest when
/// `interactive`. Prompts default to what the form already holds.
fn fill_form<S, W>(
    editor: &mut AdminEditor<S, W>,
    fields: EventFields,
    interactive: bool,
) -> Result<()>
where
    S: Storage + Clone,
    W: StorageWatcher,
{
    let day = match fields.day {
        Some(day) => Some(day),
        None if interactive => Some(prompt_text("Day", &editor.form().day, None)?),
        None => None,
    };
    // Prefill only an empty time, or the time prompt's default.
    if let Some(day) = day {
        if interactive || editor.form().time.trim().is_empty() {
            editor.select_day(&day);
        } else {
            editor.form_mut().day = day;
        }
    }

    match fields.time {
        Some(time) => editor.form_mut().time = time,
        None if interactive => {
            let completion = TimeCompletion::new(editor);
            let time = prompt_text("Time", &editor.form().time, Some(&completion))?;
            editor.form_mut().time = time;
        }
        None => {}
    }

    match fields.title {
        Some(title) => editor.form_mut().title = title,
        None if interactive => {
            let title = prompt_text("Title", &editor.form().title, None)?;
            editor.form_mut().title = title;
        }
        None => {}
    }

    match fields.description {
        Some(description) => editor.form_mut().description = description,
        None if interactive => {
            let description = prompt_text("Description", &editor.form().description, None)?;
            editor.form_mut().description = description;
        }
        None => {}
    }

    match fields.tags {
        Some(tags) => editor.form_mut().tags = tags,
        None if interactive => prompt_tags(editor)?,
        None => {}
    }

    Ok(())
}

fn prompt_text(label: &str, current: &str, completion: Option<&TimeCompletion>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(format!("  {}", label));
    if !current.is_empty() {
        input = input.default(current.to_string());
    }
    if let Some(completion) = completion {
        input = input.completion_with(completion);
    }
    Ok(input.interact_text()?)
}

/// Show the shared tag chips, read the tags field, then offer to share the
/// last typed tag the way the editor's suggestion prompt does.
fn prompt_tags<S, W>(editor: &mut AdminEditor<S, W>) -> Result<()>
where
    S: Storage + Clone,
    W: StorageWatcher,
{
    let chips = editor.tag_chips();
    if !chips.is_empty() {
        println!("  {}", render_chips(&chips));
    }

    let mut input = Input::<String>::new()
        .with_prompt("  Tags (comma separated)")
        .allow_empty(true);
    let current = editor.form().tags.clone();
    if !current.is_empty() {
        input = input.default(current);
    }
    let tags = input.interact_text()?;

    let typed_at = Instant::now();
    editor.tags_input_changed(typed_at, &tags);

    let fire_at = typed_at.checked_add(editor.prompt().delay()).unwrap_or(typed_at);
    let Some(candidate) = editor.prompt_tick(fire_at) else {
        return Ok(());
    };
    let message = editor
        .prompt()
        .message()
        .unwrap_or_else(|| format!("Add \"{}\" to shared tags?", candidate));

    let share = Confirm::new()
        .with_prompt(format!("  {}", message))
        .default(true)
        .interact()?;

    if share {
        editor.accept_prompt();
    } else {
        editor.dismiss_prompt();
    }
    Ok(())
}

/// Tab-completes the time field from the start times in use.
struct TimeCompletion {
    options: Vec<String>,
}

impl TimeCompletion {
    fn new<S, W>(editor: &AdminEditor<S, W>) -> Self
    where
        S: Storage + Clone,
        W: StorageWatcher,
    {
        TimeCompletion {
            options: available_times(editor.schedule()),
        }
    }
}

impl Completion for TimeCompletion {
    fn get(&self, input: &str) -> Option<String> {
        filter_times(&self.options, input, 1).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eden_core::editor::EditorSettings;
    use eden_core::storage::MemoryStorage;

    fn editor() -> AdminEditor<MemoryStorage, eden_core::storage::MemoryWatcher> {
        let storage = MemoryStorage::new();
        AdminEditor::open(storage.clone(), storage.subscribe(), EditorSettings::default())
    }

    #[test]
    fn test_flags_fill_form_without_prompting() {
        let mut editor = editor();
        let fields = EventFields {
            day: Some("Friday".to_string()),
            title: Some("Lantern Parade".to_string()),
            description: Some("Bring a light.".to_string()),
            tags: Some("Outdoor".to_string()),
            ..EventFields::default()
        };

        fill_form(&mut editor, fields, false).unwrap();

        // Choosing Friday prefilled the time of the Friday event.
        assert_eq!(editor.form().time, "7:30 PM");
        let event = editor.submit(editor.form().clone()).unwrap();
        assert_eq!(event.tags, vec!["Outdoor"]);
    }

    #[test]
    fn test_edit_keeps_fields_not_given() {
        let mut editor = editor();
        editor.edit("family-print-lab").unwrap();
        let fields = EventFields {
            time: Some("1:00 PM".to_string()),
            ..EventFields::default()
        };

        fill_form(&mut editor, fields, false).unwrap();
        let event = editor.submit(editor.form().clone()).unwrap();

        assert_eq!(event.id, "family-print-lab");
        assert_eq!(event.time, "1:00 PM");
        assert_eq!(event.title, "Family Print Lab");
        assert_eq!(editor.schedule().len(), 3);
    }

    #[test]
    fn test_edit_day_alone_keeps_the_time() {
        let mut editor = editor();
        editor.edit("family-print-lab").unwrap();
        let fields = EventFields {
            day: Some("Friday".to_string()),
            ..EventFields::default()
        };

        fill_form(&mut editor, fields, false).unwrap();
        let event = editor.submit(editor.form().clone()).unwrap();

        assert_eq!(event.day, "Friday");
        assert_eq!(event.time, "11:00 AM");
    }

    #[test]
    fn test_time_completion_uses_first_match() {
        let completion = TimeCompletion::new(&editor());
        assert_eq!(completion.get("7:3").as_deref(), Some("7:30 AM"));
        assert_eq!(completion.get("nothing"), None);
    }

    #[test]
    fn test_field_presence() {
        assert!(EventFields::default().is_empty());
        let fields = EventFields {
            day: Some("Friday".to_string()),
            time: Some("9:00 PM".to_string()),
            title: Some("Late Set".to_string()),
            description: Some("Music.".to_string()),
            tags: None,
        };
        assert!(fields.is_complete());
        assert!(!fields.is_empty());
    }
}
