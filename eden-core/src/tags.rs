//! Tag label helpers shared by events, the registry and the editor.
//!
//! Tags compare case-insensitively everywhere: "Talk" and "talk" are the
//! same tag, and the first casing seen wins.

use std::cmp::Ordering;
use std::collections::HashSet;

/// Trim and collapse internal whitespace runs to a single space.
pub fn normalize_tag(tag: &str) -> String {
    tag.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive identity of a tag.
pub fn tag_key(tag: &str) -> String {
    normalize_tag(tag).to_lowercase()
}

/// Normalize every tag, drop blanks and case-insensitive repeats.
/// Keeps the first-seen casing and the original order.
pub fn dedupe_tags<I, T>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for tag in tags {
        let normalized = normalize_tag(tag.as_ref());
        if normalized.is_empty() {
            continue;
        }
        if seen.insert(normalized.to_lowercase()) {
            result.push(normalized);
        }
    }

    result
}

/// Split a comma-separated tags field. Segments are trimmed and blanks
/// dropped, but repeats are kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Case-insensitive lexical order, exact string as tie-breaker.
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn sort_tags(mut tags: Vec<String>) -> Vec<String> {
    tags.sort_by(|a, b| compare_tags(a, b));
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_tag("  All \t  Ages \n"), "All Ages");
        assert_eq!(normalize_tag("   "), "");
    }

    #[test]
    fn test_dedupe_keeps_first_casing_and_order() {
        let tags = dedupe_tags([" Talk ", "talk", "  VIP ", "TALK", ""]);
        assert_eq!(tags, vec!["Talk", "VIP"]);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let inputs: Vec<Vec<&str>> = vec![
            vec![],
            vec!["a", "A", "b"],
            vec!["  Late   Night ", "late night", "Family"],
            vec!["x", " ", "", "X ", "y"],
        ];

        for input in inputs {
            let once = dedupe_tags(&input);
            let twice = dedupe_tags(&once);
            assert_eq!(once, twice);

            let keys: HashSet<String> = once.iter().map(|t| t.to_lowercase()).collect();
            assert_eq!(keys.len(), once.len(), "Tags should be unique by key");
        }
    }

    #[test]
    fn test_parse_tags_keeps_repeats() {
        assert_eq!(
            parse_tags(" Talk , talk ,  VIP ,,"),
            vec!["Talk", "talk", "VIP"]
        );
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_sort_tags_is_case_insensitive() {
        let sorted = sort_tags(vec![
            "workshop".to_string(),
            "Accessible".to_string(),
            "kids".to_string(),
            "All Ages".to_string(),
        ]);
        assert_eq!(sorted, vec!["Accessible", "All Ages", "kids", "workshop"]);
    }
}
