//! Dashboard record types

use serde::{Deserialize, Serialize};

use super::repository::{Record, RecordId};

/// Fallback title for blank content
const UNTITLED: &str = "Untitled";
const SENTENCE_TITLE_MAX: usize = 120;
const LINE_TITLE_MAX: usize = 80;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<RecordId>,
    pub title: String,
    /// Unix ms
    pub created_at: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<RecordId>,
    pub project_id: RecordId,
    pub text: String,
    pub completed: bool,
    pub created_at: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickLink {
    pub id: Option<RecordId>,
    pub category: String,
    pub name: String,
    pub url: String,
}

/// Free-form markdown note from the writer view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Writeup {
    pub id: Option<RecordId>,
    pub content: String,
    pub updated_at: f64,
}

impl Writeup {
    pub fn title(&self) -> String {
        derive_title(&self.content)
    }
}

macro_rules! impl_record {
    ($ty:ty, $table:literal) => {
        impl Record for $ty {
            const TABLE: &'static str = $table;

            fn id(&self) -> Option<RecordId> {
                self.id
            }

            fn set_id(&mut self, id: RecordId) {
                self.id = Some(id);
            }
        }
    };
}

impl_record!(Project, "projects");
impl_record!(Task, "tasks");
impl_record!(QuickLink, "quicklinks");
impl_record!(Writeup, "writeups");

/// Derive a display title from markdown content
///
/// Takes the first non-blank line, drops leading `#` heading markers, then
/// keeps the first sentence if one ends within 120 chars, else the first
/// 80 chars of the line.
pub fn derive_title(content: &str) -> String {
    let Some(first) = content.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return UNTITLED.to_string();
    };
    let line = first.trim_start_matches('#').trim_start();

    if let Some(sentence) = first_sentence(line) {
        return sentence;
    }
    line.chars().take(LINE_TITLE_MAX).collect()
}

/// Prefix ending at the first `.`, `?`, `!` or `\` that is followed by
/// whitespace or end of line, cut to `SENTENCE_TITLE_MAX` chars
///
/// The terminator may sit at char index `SENTENCE_TITLE_MAX` at the latest.
fn first_sentence(line: &str) -> Option<String> {
    let mut chars = line.char_indices().enumerate().peekable();
    while let Some((count, (idx, c))) = chars.next() {
        if count > SENTENCE_TITLE_MAX {
            return None;
        }
        // A terminator as the very first char doesn't make a sentence
        if count == 0 || !matches!(c, '.' | '?' | '!' | '\\') {
            continue;
        }
        let at_boundary = match chars.peek() {
            None => true,
            Some((_, (_, next))) => next.is_whitespace(),
        };
        if at_boundary {
            let sentence = &line[..idx + c.len_utf8()];
            return Some(sentence.chars().take(SENTENCE_TITLE_MAX).collect());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_untitled() {
        assert_eq!(derive_title(""), "Untitled");
        assert_eq!(derive_title("  \n\t\n"), "Untitled");
    }

    #[test]
    fn test_heading_markers_stripped() {
        assert_eq!(derive_title("\n## Weekly plan\nbody"), "Weekly plan");
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(
            derive_title("Ship the beta. Then rest for a week"),
            "Ship the beta."
        );
        assert_eq!(derive_title("Really? yes"), "Really?");
        // No boundary after the dot
        assert_eq!(derive_title("v1.2 notes"), "v1.2 notes");
    }

    #[test]
    fn test_long_line_truncated() {
        let line = "x".repeat(200);
        assert_eq!(derive_title(&line).chars().count(), 80);
    }

    #[test]
    fn test_sentence_end_at_limit() {
        // Terminator at char index 120: kept, title cut to 120 chars
        let line = format!("{}. tail", "z".repeat(120));
        let title = derive_title(&line);
        assert_eq!(title.chars().count(), 120);
        assert_eq!(title, "z".repeat(120));

        // One char later it no longer counts as a sentence
        let line = format!("{}. tail", "z".repeat(121));
        assert_eq!(derive_title(&line), "z".repeat(80));
    }

    #[test]
    fn test_backslash_ends_sentence() {
        assert_eq!(derive_title("Line break\\ next"), "Line break\\");
    }

    #[test]
    fn test_late_sentence_end_ignored() {
        let line = format!("{}. tail", "y".repeat(150));
        assert_eq!(derive_title(&line), "y".repeat(80));
    }
}
