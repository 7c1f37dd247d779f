//! LLM response formatting
//!
//! Normalizes raw model output into readable paragraph/list structure:
//! numbered items and bullets that the model emitted mid-line each get
//! their own paragraph, whitespace is trimmed, empty paragraphs dropped.
//!
//! The pass is idempotent: every emitted paragraph is a fixed point, so
//! re-formatting already-formatted text changes nothing.

use once_cell::sync::Lazy;
use regex::Regex;

// "1.First" or mid-sentence "2. Second" -> break before the marker and
// normalize the spacing after it.
static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\.\s*").expect("numbered-item pattern must compile"));

static BULLET_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"•\s*").expect("bullet pattern must compile"));

// A dash is only a list marker when followed by whitespace; hyphenated
// words ("well-being") must survive.
static DASH_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-\s+").expect("dash pattern must compile"));

/// Deterministic text-reshaping pass over raw LLM output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFormatter;

impl ResponseFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Reformat raw model output.
    ///
    /// Splits on line breaks, re-inserts a break before mid-line list
    /// markers (`N.`, `•`, `- `), trims each resulting paragraph, drops
    /// empties and rejoins with a blank line.
    pub fn format(&self, raw: &str) -> String {
        let mut paragraphs: Vec<String> = Vec::new();

        for line in raw.split('\n') {
            let line = NUMBERED_ITEM.replace_all(line, "\n$1. ");
            let line = BULLET_ITEM.replace_all(&line, "\n• ");
            let line = DASH_ITEM.replace_all(&line, "\n- ");

            for piece in line.split('\n') {
                let piece = piece.trim();
                if !piece.is_empty() {
                    paragraphs.push(piece.to_string());
                }
            }
        }

        paragraphs.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(raw: &str) -> String {
        ResponseFormatter::new().format(raw)
    }

    #[test]
    fn test_numbered_items_get_own_lines() {
        let out = fmt("1.First 2.Second");
        let lines: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1."));
        assert!(lines[1].starts_with("2."));
        assert_eq!(out, "1. First\n\n2. Second");
    }

    #[test]
    fn test_mid_line_numbered_list() {
        let out = fmt("Here are some tips: 1. Rest well 2. Stay hydrated");
        assert_eq!(
            out,
            "Here are some tips:\n\n1. Rest well\n\n2. Stay hydrated"
        );
    }

    #[test]
    fn test_bullets_split() {
        let out = fmt("options: • rest • fluids");
        assert_eq!(out, "options:\n\n• rest\n\n• fluids");
    }

    #[test]
    fn test_dash_bullets_split_but_hyphens_survive() {
        let out = fmt("focus on well-being - eat well - sleep enough");
        assert_eq!(out, "focus on well-being\n\n- eat well\n\n- sleep enough");
    }

    #[test]
    fn test_trims_and_drops_empty_paragraphs() {
        let out = fmt("  first paragraph  \n\n\n   \nsecond paragraph\n");
        assert_eq!(out, "first paragraph\n\nsecond paragraph");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "1.First 2.Second",
            "Here are some tips: 1. Rest well 2. Stay hydrated",
            "options: • rest • fluids",
            "focus on well-being - eat well - sleep enough",
            "plain text without any markers",
            "  messy \n\n input\nwith 3.items • and - bullets\n",
            "",
        ];
        let formatter = ResponseFormatter::new();
        for input in inputs {
            let once = formatter.format(input);
            let twice = formatter.format(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(fmt(""), "");
        assert_eq!(fmt("\n\n \n"), "");
    }
}
