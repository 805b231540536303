//! Display formatting for node labels
//!
//! Long category values make Sankey node labels unreadable, so labels can be
//! folded onto several lines or cut to a fixed width. Only the displayed label
//! is affected; node identity always uses the original value.

use serde::{Deserialize, Serialize};

/// Line separator understood by Plotly's Sankey labels
pub const DEFAULT_LINE_BREAK: &str = "<br>";

/// How a label is shortened for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelFormat {
    /// Keep the full value on one line
    #[default]
    None,
    /// Fold onto lines of at most `width` characters
    Wrap(usize),
    /// Keep only the first `max` characters
    Truncate(usize),
}

/// Format a label according to `format`, joining wrapped lines with `line_break`
pub fn format_label(text: &str, format: &LabelFormat, line_break: &str) -> String {
    match format {
        LabelFormat::None => text.to_string(),
        LabelFormat::Wrap(width) => wrap(text, *width).join(line_break),
        LabelFormat::Truncate(max) => text.chars().take(*max).collect(),
    }
}

/// Greedy word wrap
///
/// Words are separated by whitespace; runs of whitespace collapse to a single
/// space. A word longer than `width` is split into `width`-sized pieces.
/// A `width` of 0 disables wrapping.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > width {
            // Long word: flush the current line, then hard-split the word
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(width).peekable();
            while let Some(chunk) = chunks.next() {
                if chunks.peek().is_some() {
                    lines.push(chunk.iter().collect());
                } else {
                    current = chunk.iter().collect();
                    current_len = chunk.len();
                }
            }
            continue;
        }

        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text_unchanged() {
        assert_eq!(wrap("Mobile", 40), vec!["Mobile"]);
    }

    #[test]
    fn test_wrap_breaks_on_whitespace() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap("abcdefghij xy", 4), vec!["abcd", "efgh", "ij", "xy"]);
        assert_eq!(wrap("abcdefgh", 4), vec!["abcd", "efgh"]);
    }

    #[test]
    fn test_wrap_empty_and_zero_width() {
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("a b", 0), vec!["a b"]);
    }

    #[test]
    fn test_wrap_counts_characters_not_bytes() {
        assert_eq!(wrap("ééé ééé", 3), vec!["ééé", "ééé"]);
    }

    #[test]
    fn test_format_label_wrap_joins_with_line_break() {
        let label = format_label(
            "organic search traffic",
            &LabelFormat::Wrap(8),
            DEFAULT_LINE_BREAK,
        );
        assert_eq!(label, "organic<br>search<br>traffic");
    }

    #[test]
    fn test_format_label_truncate() {
        assert_eq!(format_label("Unknown source", &LabelFormat::Truncate(7), "\n"), "Unknown");
        assert_eq!(format_label("abc", &LabelFormat::Truncate(7), "\n"), "abc");
    }

    #[test]
    fn test_format_label_none() {
        assert_eq!(format_label("  spaced  ", &LabelFormat::None, "\n"), "  spaced  ");
    }
}
