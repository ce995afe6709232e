//! Terminal rendering for schedule types.
//!
//! Extension traits that add colored output to eden-core types using
//! owo_colors.

use chrono::{Datelike, Local};
use eden_core::Event;
use eden_core::autocomplete::TagChip;
use eden_core::public::{EMPTY_SCHEDULE_MESSAGE, ScheduleCard};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

fn render_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("[{}]", tag).cyan().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Render for ScheduleCard {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("{} {}", self.day.bold(), self.time.dimmed()),
            format!("  {}", self.title.green().bold()),
            format!("  {}", self.description),
        ];
        if !self.tags.is_empty() {
            lines.push(format!("  {}", render_tags(&self.tags)));
        }
        lines.join("\n")
    }
}

/// One admin row: id, day and time, title and tags.
impl Render for Event {
    fn render(&self) -> String {
        let mut line = format!(
            "{}  {} {}  {}",
            self.id.dimmed(),
            self.day.bold(),
            self.time,
            self.title.green()
        );
        if !self.tags.is_empty() {
            line.push_str("  ");
            line.push_str(&render_tags(&self.tags));
        }
        line
    }
}

impl Render for TagChip {
    fn render(&self) -> String {
        if self.selected {
            format!("[x] {}", self.label).green().to_string()
        } else {
            format!("[ ] {}", self.label).dimmed().to_string()
        }
    }
}

pub fn render_cards(cards: &[ScheduleCard]) -> String {
    if cards.is_empty() {
        return EMPTY_SCHEDULE_MESSAGE.dimmed().to_string();
    }

    cards
        .iter()
        .map(Render::render)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_chips(chips: &[TagChip]) -> String {
    chips
        .iter()
        .map(Render::render)
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn footer() -> String {
    format!("© {} Eden Festival", Local::now().year())
        .dimmed()
        .to_string()
}
