//! "Add this tag for everyone?" suggestion over the free-text tags field.
//!
//! Debounced: every keystroke re-arms a short timer, and only when it
//! elapses is the last typed segment considered. The caller owns the
//! clock and passes `Instant`s in, so the machine is driven the same way
//! by a UI loop and by tests.

use std::time::{Duration, Instant};

use crate::tags::{join_tags, normalize_tag, parse_tags, tag_key};

pub const DEFAULT_PROMPT_DELAY: Duration = Duration::from_millis(350);

/// Shorter candidates are never offered.
pub const MIN_CANDIDATE_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState {
    Idle,
    /// Timer armed by the latest keystroke.
    Pending { deadline: Instant },
    Shown { candidate: String },
    /// The user declined this candidate; it stays quiet until the text changes.
    Dismissed { key: String },
}

/// Result of accepting the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedTag {
    pub tag: String,
    /// Tags field with its last segment replaced by the canonical tag.
    pub input: String,
}

pub struct TagPrompt {
    delay: Duration,
    state: PromptState,
    dismissed_key: Option<String>,
}

impl Default for TagPrompt {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_DELAY)
    }
}

impl TagPrompt {
    pub fn new(delay: Duration) -> Self {
        TagPrompt {
            delay,
            state: PromptState::Idle,
            dismissed_key: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    pub fn candidate(&self) -> Option<&str> {
        match &self.state {
            PromptState::Shown { candidate } => Some(candidate),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<String> {
        self.candidate()
            .map(|candidate| format!("Add \"{}\" to shared tags for everyone?", candidate))
    }

    /// A keystroke: hide any visible prompt and re-arm the timer.
    pub fn on_input(&mut self, now: Instant) {
        self.state = PromptState::Pending {
            deadline: now.checked_add(self.delay).unwrap_or(now),
        };
    }

    /// Fire the timer if it has elapsed. Returns the candidate when the
    /// prompt becomes visible.
    pub fn tick<F>(&mut self, now: Instant, input: &str, is_known: F) -> Option<&str>
    where
        F: Fn(&str) -> bool,
    {
        let PromptState::Pending { deadline } = &self.state else {
            return None;
        };
        if now < *deadline {
            return None;
        }

        self.state = self.evaluate(input, is_known);
        self.candidate()
    }

    fn evaluate<F>(&mut self, input: &str, is_known: F) -> PromptState
    where
        F: Fn(&str) -> bool,
    {
        let segments: Vec<&str> = input.split(',').map(str::trim).collect();
        let Some(index) = segments.iter().rposition(|s| !s.is_empty()) else {
            return PromptState::Idle;
        };

        let candidate = normalize_tag(segments[index]);
        let key = candidate.to_lowercase();

        if let Some(dismissed) = &self.dismissed_key {
            if *dismissed == key {
                return PromptState::Dismissed { key };
            }
            self.dismissed_key = None;
        }

        if is_known(&key) {
            return PromptState::Idle;
        }

        let repeated = segments[..index]
            .iter()
            .any(|s| !s.is_empty() && tag_key(s) == key);
        if repeated || candidate.chars().count() < MIN_CANDIDATE_CHARS {
            return PromptState::Idle;
        }

        PromptState::Shown { candidate }
    }

    /// Accept the visible candidate. The caller adds `tag` to the registry
    /// and writes `input` back to the field.
    pub fn accept(&mut self, input: &str) -> Option<AcceptedTag> {
        let PromptState::Shown { candidate } = &self.state else {
            return None;
        };
        let tag = normalize_tag(candidate);

        let mut tags = parse_tags(input);
        match tags.last_mut() {
            Some(last) => *last = tag.clone(),
            None => tags.push(tag.clone()),
        }

        self.dismissed_key = None;
        self.state = PromptState::Idle;
        Some(AcceptedTag {
            tag,
            input: join_tags(&tags),
        })
    }

    /// Decline the visible candidate.
    pub fn dismiss(&mut self) -> bool {
        let PromptState::Shown { candidate } = &self.state else {
            return false;
        };
        let key = candidate.to_lowercase();
        self.dismissed_key = Some(key.clone());
        self.state = PromptState::Dismissed { key };
        true
    }

    /// Focus left the field: cancel the timer and hide the prompt.
    pub fn on_blur(&mut self) {
        self.state = PromptState::Idle;
    }

    /// A new form was loaded; forget any dismissal too.
    pub fn reset(&mut self) {
        self.state = PromptState::Idle;
        self.dismissed_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(key: &str) -> bool {
        ["talk", "kids"].contains(&key)
    }

    fn shown_after(prompt: &mut TagPrompt, input: &str) -> Option<String> {
        let start = Instant::now();
        prompt.on_input(start);
        prompt
            .tick(start + DEFAULT_PROMPT_DELAY, input, known)
            .map(String::from)
    }

    #[test]
    fn test_waits_for_debounce_window() {
        let mut prompt = TagPrompt::default();
        let start = Instant::now();

        prompt.on_input(start);
        assert_eq!(prompt.tick(start + Duration::from_millis(100), "Talk, VIP", known), None);
        assert!(matches!(prompt.state(), PromptState::Pending { .. }));

        assert_eq!(
            prompt.tick(start + Duration::from_millis(350), "Talk, VIP", known),
            Some("VIP")
        );
        assert_eq!(
            prompt.message().as_deref(),
            Some("Add \"VIP\" to shared tags for everyone?")
        );
    }

    #[test]
    fn test_new_keystroke_rearms_timer() {
        let mut prompt = TagPrompt::default();
        let start = Instant::now();

        prompt.on_input(start);
        prompt.on_input(start + Duration::from_millis(300));

        assert_eq!(prompt.tick(start + Duration::from_millis(400), "VIP", known), None);
        assert_eq!(
            prompt.tick(start + Duration::from_millis(650), "VIP", known),
            Some("VIP")
        );
    }

    #[test]
    fn test_candidate_rules() {
        let mut prompt = TagPrompt::default();

        assert_eq!(shown_after(&mut prompt, ""), None);
        assert_eq!(shown_after(&mut prompt, " , ,"), None);
        assert_eq!(shown_after(&mut prompt, "Kids, x"), None);
        assert_eq!(shown_after(&mut prompt, "Kids, TALK"), None);
        assert_eq!(shown_after(&mut prompt, "Late  Night, late night"), None);
        assert_eq!(
            shown_after(&mut prompt, "Kids,  Late   Night , "),
            Some("Late Night".to_string())
        );
    }

    #[test]
    fn test_dismissal_sticks_until_candidate_changes() {
        let mut prompt = TagPrompt::default();

        assert_eq!(shown_after(&mut prompt, "VIP"), Some("VIP".to_string()));
        assert!(prompt.dismiss());
        assert!(matches!(prompt.state(), PromptState::Dismissed { .. }));

        assert_eq!(shown_after(&mut prompt, "vip"), None);
        assert_eq!(shown_after(&mut prompt, "VIP2"), Some("VIP2".to_string()));
        // Dismissal was cleared by the different candidate.
        assert_eq!(shown_after(&mut prompt, "VIP"), Some("VIP".to_string()));
    }

    #[test]
    fn test_accept_canonicalizes_last_segment() {
        let mut prompt = TagPrompt::default();
        assert!(shown_after(&mut prompt, "Kids,  late   show ").is_some());

        let accepted = prompt.accept("Kids,  late   show ").unwrap();
        assert_eq!(accepted.tag, "late show");
        assert_eq!(accepted.input, "Kids, late show");
        assert_eq!(prompt.state(), &PromptState::Idle);
        assert!(prompt.accept("Kids").is_none());
    }

    #[test]
    fn test_oversized_delay_does_not_overflow() {
        let mut prompt = TagPrompt::new(Duration::MAX);
        let start = Instant::now();

        prompt.on_input(start);
        assert_eq!(prompt.tick(start, "VIP", known), Some("VIP"));
    }

    #[test]
    fn test_blur_cancels_pending_timer() {
        let mut prompt = TagPrompt::default();
        let start = Instant::now();

        prompt.on_input(start);
        prompt.on_blur();

        assert_eq!(prompt.tick(start + Duration::from_secs(1), "VIP", known), None);
        assert_eq!(prompt.state(), &PromptState::Idle);
    }
}
